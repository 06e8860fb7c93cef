use super::*;
use helpdesk::{Endpoint, Method};

#[test]
fn bearer_header_prefixes_scheme() {
    assert_eq!(bearer_header("abc.def.ghi"), "Bearer abc.def.ghi");
}

#[cfg(not(feature = "csr"))]
#[test]
fn native_build_reports_unavailable() {
    let request = ApiRequest {
        method: Method::Get,
        endpoint: Endpoint::Me,
        url: "http://localhost/api/User/me".to_owned(),
        bearer: None,
        body: None,
    };
    let result = futures::executor::block_on(GlooTransport.send(request));
    assert_eq!(result, Err(TransportError::Unavailable));
}
