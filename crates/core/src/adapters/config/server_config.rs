#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: Box<str>,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
