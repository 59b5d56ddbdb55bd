//! Data model: raw cache rows, collection schemas, and query results.

mod records;
mod results;
mod schema;

pub use records::{BlockRecord, CollectionRecord};
pub use results::{
    AncestorNode, ChildPageNode, ContentNode, DatabaseInfo, PageContent, RecentPage, SearchHit,
    SummaryInfo,
};
pub use schema::{
    parse_schema, CollectionSchema, PropertyDefinition, SchemaOption, UNKNOWN_PROPERTY_TYPE,
};
