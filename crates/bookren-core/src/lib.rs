//! bookren core: read Kindle AZW3 metadata and rename the book (plus its
//! companion files) to `"{title}.{asin}{prefix}{authors}"`.

pub mod config;
pub mod logging;

pub mod cover;
pub mod mobi;
pub mod naming;
pub mod process;
pub mod rename;
