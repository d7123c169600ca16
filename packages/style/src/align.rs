use crate::properties::CssProperties;
use pagecraft_model::Align;

/// Flex alignment value for a container `align`
pub fn flex_value(align: Align) -> &'static str {
    match align {
        Align::Left => "flex-start",
        Align::Right => "flex-end",
        Align::Center => "center",
        Align::Justify => "stretch",
    }
}

/// `align` attribute used on email table cells, where flex is unavailable
pub fn email_align(align: Align) -> &'static str {
    match align {
        Align::Left | Align::Justify => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

/// Flex container properties placing children per `align`.
///
/// The container stacks its children vertically, so `alignItems` carries the
/// horizontal placement.
pub fn align_properties(align: Option<Align>) -> CssProperties {
    let mut properties = CssProperties::new()
        .with("display", "flex")
        .with("flexDirection", "column");

    if let Some(align) = align {
        properties.set("alignItems", flex_value(align));
        properties.set("justifyContent", flex_value(align));
    }

    properties
}
