use serde::Deserialize;

/// Body of an account retirement request.
#[derive(Deserialize, Debug)]
pub struct RetireRequestData {
    /// Id of the retiring user.
    pub user_id: i64,
    /// Primary or secondary email of the retiring user.
    pub email: String,
}
