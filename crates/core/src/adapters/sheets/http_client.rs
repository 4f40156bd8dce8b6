use google_sheets4::{hyper, hyper_rustls};

pub type SheetsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type SheetsClient = hyper::Client<SheetsConnector>;

pub fn http_client() -> SheetsClient {
    hyper::Client::builder().build(
        hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .https_only()
            .enable_http1()
            .build(),
    )
}
