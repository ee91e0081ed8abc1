mod sheet;
mod translate;

pub use sheet::StyleSheet;
pub use translate::{StyleMap, StyleTranslator, native_name, style_map, translate};
