// Request logging, compression and trailing-slash handling

use actix_web::middleware::{Compress, Logger, NormalizePath};

pub fn setup_middleware() -> (Logger, Compress, NormalizePath) {
    let logger = Logger::new(r#"%a "%r" %s %b %Dms"#);
    let compress = Compress::default();
    let normalize = NormalizePath::trim();
    (logger, compress, normalize)
}
