use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain `{"message": ...}` body returned by the root route.
#[derive(Serialize, Debug)]
pub struct Message {
    pub message: &'static str,
}
