use actix_cors::Cors;
use actix_web::http::header;

pub fn configure_cors() -> Cors {
    // Credentialed requests cannot use the wildcard origin, so echo the
    // caller's origin back instead.
    Cors::default()
        .allowed_origin_fn(|_origin, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ACCEPT_LANGUAGE,
        ])
        .supports_credentials()
        .max_age(3600)
}
