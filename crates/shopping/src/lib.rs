pub mod aggregation;
pub mod export;
pub mod normalize;
pub mod quantity;

// Re-export commonly used types
pub use aggregation::{AggregatedIngredient, IngredientAggregationService};
pub use export::{DEFAULT_TITLE, Document, DocumentRenderer, LineItem, build_shopping_list_document};
pub use normalize::{normalize, normalize_token, tokens};
pub use quantity::{Quantity, QuantityBook, Unit};
