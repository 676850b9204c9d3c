#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub auth_url: String,
    pub secure_cookies: bool,
    pub request_timeout: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(auth_url: String) -> Self {
        Self {
            auth_url,
            secure_cookies: false,
            request_timeout: 30,
        }
    }
}
