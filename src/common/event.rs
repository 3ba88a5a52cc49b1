use chrono::{DateTime, Utc};

pub trait DomainEvent: Send + Sync + Clone {
    fn event_type(&self) -> &'static str;
    fn session_id(&self) -> &str;
    fn occurred_at(&self) -> DateTime<Utc>;
}
