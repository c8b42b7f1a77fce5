use serde::Deserialize;

/// Query parameters of the login page.
#[derive(Deserialize, Debug)]
pub struct LoginQueryData {
    /// Where to send the user once logged in.
    pub next: Option<String>,
}
