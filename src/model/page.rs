use serde::Deserialize;

pub const PAGE_SIZE: u64 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn page_count(&self) -> u64 {
        page_count(self.total)
    }
}

pub fn page_count(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}

/// `{ data, total }` as returned by the paged list endpoints. Some server
/// versions report the count only under `pagination.totalItems`.
#[derive(Deserialize, Debug)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total_items: Option<u64>,
}

impl<T> From<ListEnvelope<T>> for Page<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        let total = envelope
            .total
            .or_else(|| envelope.pagination.as_ref().and_then(|p| p.total_items))
            .unwrap_or(envelope.data.len() as u64);
        Page {
            items: envelope.data,
            total,
        }
    }
}
