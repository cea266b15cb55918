use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use humantime::format_duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hrdesk::client::api::HttpApi;
use hrdesk::client::http::HttpClient;
use hrdesk::model::config::{ClientConfig, DEPARTMENTS_PATH};
use hrdesk::model::department::Category;
use hrdesk::model::user::{Gender, Role};
use hrdesk::router::Route;
use hrdesk::store::encryptor::MagicEncryptor;
use hrdesk::store::file::FileSessionStore;
use hrdesk::view::department::DepartmentView;
use hrdesk::view::login::LoginView;
use hrdesk::view::profile::ProfileView;
use hrdesk::view::queries::QueriesView;
use hrdesk::view::signup::SignupView;
use hrdesk::view::ViewError;
use hrdesk::{model, render, Encryptor, HrApi, SessionStore};

/// HR management client
#[derive(Parser, Debug)]
#[command(version, name = "hrdesk", about, long_about = None)]
struct Args {
    /// HR API server uri
    #[arg(long, env)]
    server_uri: String,
    /// Request timeout
    #[arg(long, env, default_value = "120s", value_parser = humantime::parse_duration)]
    timeout: Duration,
    /// Path prefix for department updates, older servers use /departments
    #[arg(long, env, default_value = DEPARTMENTS_PATH)]
    update_prefix: String,
    /// File keeping the session between runs
    #[arg(long, env)]
    session_file: Option<PathBuf>,
    // session file encryption key, at least 16 chars
    #[arg(long, env, default_value = "", hide_env_values = true)]
    session_key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "HR_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "male")]
        gender: Gender,
        /// Hobby, may be repeated
        #[arg(long = "hobby")]
        hobbies: Vec<String>,
        #[arg(long, default_value = "employee")]
        role: String,
    },
    /// Log in and open the page for the user's role
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Open a page by its path, e.g. /employee-queries
    Open { path: String },
    /// Manage departments
    #[command(subcommand)]
    Departments(DepartmentCommand),
    /// Show own profile and department
    Profile,
    /// Show the employee reports
    Reports,
}

#[derive(Subcommand, Debug)]
enum DepartmentCommand {
    /// List one page of departments
    List {
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Add a department
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        location: String,
        #[arg(long)]
        salary: String,
    },
    /// Change a department, only the given fields are sent
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        salary: Option<String>,
    },
    /// Delete a department
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Assign employees, ids separated by commas
    Assign { id: String, employee_ids: String },
}

struct App {
    api: Arc<dyn HrApi + Send + Sync>,
    session: Arc<dyn SessionStore + Send + Sync>,
    cancel: CancellationToken,
}

async fn main_int(args: Args) -> anyhow::Result<()> {
    log::info!("Starting hrdesk");
    tracing::info!(version = env!("CARGO_PKG_VERSION"));
    tracing::info!(server_uri = args.server_uri, "cfg");
    tracing::info!(timeout = format_duration(args.timeout).to_string(), "cfg");
    tracing::info!(update_prefix = args.update_prefix, "cfg");

    let config = ClientConfig::new(&args.server_uri)?
        .with_timeout(args.timeout)
        .with_update_prefix(&args.update_prefix);

    let session_file = match &args.session_file {
        Some(path) => path.clone(),
        None => default_session_file()?,
    };
    let encryptor: Option<Box<dyn Encryptor + Send + Sync>> = if args.session_key.is_empty() {
        log::warn!("Session file is not encrypted");
        None
    } else {
        Some(Box::new(MagicEncryptor::new(&args.session_key)?))
    };
    let session: Arc<dyn SessionStore + Send + Sync> =
        Arc::new(FileSessionStore::new(&session_file, encryptor));
    let api: Arc<dyn HrApi + Send + Sync> =
        Arc::new(HttpApi::new(HttpClient::new(config, session.clone())?));

    let app = App {
        api,
        session,
        cancel: CancellationToken::new(),
    };
    let cancel = app.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Ctrl-C received, cancelling");
            cancel.cancel();
        }
    });

    app.run(args.command).await?;
    tracing::info!("Bye");
    Ok(())
}

fn default_session_file() -> anyhow::Result<PathBuf> {
    let dir = dirs::data_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("no data dir, pass --session-file"))?;
    Ok(dir.join("hrdesk").join("session.json"))
}

impl App {
    async fn run(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Register {
                first_name,
                last_name,
                email,
                password,
                gender,
                hobbies,
                role,
            } => {
                let mut view = SignupView::new(self.api.clone());
                view.form.first_name = first_name;
                view.form.last_name = last_name;
                view.form.email = email;
                view.form.password = password.into();
                view.form.gender = gender;
                view.form.role = Role::from(role);
                for hobby in hobbies {
                    view.form.new_hobby = hobby;
                    view.form.add_hobby();
                }
                let route = view.submit(&self.cancel).await?;
                println!("Account created, log in at {}", route);
            }
            Command::Login { email, password } => {
                let mut view = LoginView::new(self.api.clone(), self.session.clone());
                view.form.email = email;
                view.form.password = password.into();
                let route = view.submit(&self.cancel).await?;
                tracing::debug!(route = %route, "navigating");
                self.open(route).await?;
            }
            Command::Logout => match self.session.remove().await {
                Ok(()) => println!("Logged out"),
                Err(model::store::Error::NoSession()) => println!("Not logged in"),
                Err(e) => return Err(e.into()),
            },
            Command::Open { path } => {
                let route = Route::parse(&path)
                    .ok_or_else(|| anyhow::anyhow!("no page at {}", path))?;
                self.open(route).await?;
            }
            Command::Departments(cmd) => self.departments(cmd).await?,
            Command::Profile => self.open(Route::EmployeeProfile).await?,
            Command::Reports => self.open(Route::EmployeeQueries).await?,
        }
        Ok(())
    }

    async fn open(&self, route: Route) -> anyhow::Result<()> {
        let (res, page) = match route {
            Route::Login => {
                println!("Log in with: hrdesk login --email <email>");
                return Ok(());
            }
            Route::Signup => {
                println!("Create an account with: hrdesk register --help");
                return Ok(());
            }
            Route::EmployeeProfile => {
                let mut view = ProfileView::new(self.api.clone());
                let res = view.load(&self.cancel).await;
                (res, render::profile(&view))
            }
            Route::EmployeeQueries => {
                let mut view = QueriesView::new(self.api.clone());
                let res = view.load(&self.cancel).await;
                (res, render::queries(&view))
            }
            Route::DepartmentManagement => {
                let mut view = DepartmentView::new(self.api.clone());
                let res = view.load(&self.cancel).await;
                (res, render::departments(&view))
            }
        };
        if !matches!(res, Err(ViewError::Cancelled())) {
            print!("{}", page);
        }
        Ok(res?)
    }

    async fn departments(&self, cmd: DepartmentCommand) -> anyhow::Result<()> {
        let mut view = DepartmentView::new(self.api.clone());
        let res = self.departments_int(&mut view, cmd).await;
        if !matches!(res, Err(ViewError::Cancelled())) {
            print!("{}", render::departments(&view));
        }
        Ok(res?)
    }

    async fn departments_int(
        &self,
        view: &mut DepartmentView,
        cmd: DepartmentCommand,
    ) -> Result<(), ViewError> {
        let cancel = &self.cancel;
        match cmd {
            DepartmentCommand::List { page } => view.change_page(page, cancel).await,
            DepartmentCommand::Create {
                name,
                category,
                location,
                salary,
            } => {
                view.begin_create();
                if let Some(form) = view.form_mut() {
                    form.department_name = name;
                    form.category = Some(category);
                    form.location = location;
                    form.salary = salary;
                }
                view.submit_form(cancel).await
            }
            DepartmentCommand::Update {
                id,
                name,
                category,
                location,
                salary,
            } => {
                let department = view.locate(&id, cancel).await?;
                view.begin_edit(&department);
                if let Some(form) = view.form_mut() {
                    if let Some(name) = name {
                        form.department_name = name;
                    }
                    if category.is_some() {
                        form.category = category;
                    }
                    if let Some(location) = location {
                        form.location = location;
                    }
                    if let Some(salary) = salary {
                        form.salary = salary;
                    }
                }
                view.submit_form(cancel).await
            }
            DepartmentCommand::Delete { id, yes } => {
                let department = view.locate(&id, cancel).await?;
                view.request_delete(&department);
                if yes || confirm(&department.department_name) {
                    view.confirm_delete(cancel).await
                } else {
                    view.cancel();
                    Ok(())
                }
            }
            DepartmentCommand::Assign { id, employee_ids } => {
                let department = view.locate(&id, cancel).await?;
                view.begin_assign(&department);
                view.set_assign_input(&employee_ids);
                view.submit_assign(cancel).await
            }
        }
    }
}

fn confirm(name: &str) -> bool {
    print!("Are you sure you want to delete {}? [y/N] ", name);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::Layer::default()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
    let args = Args::parse();
    if let Err(e) = main_int(args).await {
        log::error!("{}", e);
        return Err(e);
    }
    Ok(())
}
