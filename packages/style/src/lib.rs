//! # Pagecraft Style
//!
//! Pure style composition shared by every block renderer.
//!
//! Every target (interactive tree, published markup, email markup) builds its
//! styles through these functions, so the same block data always yields the
//! same alignment, background and width math regardless of target.
//!
//! ```rust,ignore
//! use pagecraft_style::{compose_container, effective_width};
//!
//! assert_eq!(effective_width("100%", None, Some("0px 10px 0px 10px")), "calc(100% - 20px)");
//! let props = compose_container(&block.container_style(), "100%");
//! let css = props.to_css_string();
//! ```

pub mod align;
pub mod background;
pub mod box_model;
pub mod container;
pub mod properties;

pub use align::{align_properties, email_align, flex_value};
pub use background::background_image_value;
pub use box_model::{effective_width, BoxSides, Length};
pub use container::compose_container;
pub use properties::{camel_to_kebab, CssProperties};
