mod webhook;

pub use webhook::{
    fallback, github_webhook, transaction_id, FilteredResponse, DELIVERY_HEADER, EVENT_HEADER,
};
