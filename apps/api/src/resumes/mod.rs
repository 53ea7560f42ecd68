// Resume API: upload pipeline and CRUD handlers over the résumé store.

pub mod handlers;
pub mod pipeline;
