use crate::align::align_properties;
use crate::background::background_image_value;
use crate::box_model::effective_width;
use crate::properties::CssProperties;
use pagecraft_model::ContainerStyle;

/// Effective wrapper properties for a block or page container.
///
/// `align` is consumed here to derive flex placement, the background image
/// is wrapped, and the width accounts for horizontal margins.
pub fn compose_container(style: &ContainerStyle, parent_width: &str) -> CssProperties {
    let mut properties = CssProperties::from_serializable(style);
    properties.remove("align");

    properties.set(
        "width",
        effective_width(parent_width, style.width.as_deref(), style.margin.as_deref()),
    );

    if let Some(image) = style.background_image.as_deref() {
        let value = background_image_value(image);
        if value.is_empty() {
            properties.remove("backgroundImage");
        } else {
            properties.set("backgroundImage", value);
            properties.set("backgroundSize", "cover");
            properties.set("backgroundPosition", "center");
        }
    }

    properties.extend(align_properties(style.align));
    properties.set("boxSizing", "border-box");
    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::Align;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compose_full_container() {
        let style = ContainerStyle {
            align: Some(Align::Right),
            background_color: Some("#eee".to_string()),
            background_image: Some("bg.png".to_string()),
            padding: Some("8px".to_string()),
            margin: Some("0px 10px 0px 10px".to_string()),
            ..Default::default()
        };

        let props = compose_container(&style, "100%");

        assert_eq!(props.get("width"), Some("calc(100% - 20px)"));
        assert_eq!(props.get("backgroundImage"), Some("url(\"bg.png\")"));
        assert_eq!(props.get("alignItems"), Some("flex-end"));
        assert_eq!(props.get("margin"), Some("0px 10px 0px 10px"));
        assert!(!props.contains("align"));
        assert!(!props.to_css_string().contains("align:"));
    }

    #[test]
    fn test_explicit_width_is_kept() {
        let style = ContainerStyle {
            width: Some("320px".to_string()),
            margin: Some("0 20px".to_string()),
            ..Default::default()
        };
        assert_eq!(compose_container(&style, "100%").get("width"), Some("320px"));
    }

    #[test]
    fn test_empty_container_is_full_width_flex() {
        let css = compose_container(&ContainerStyle::default(), "100%").to_css_string();
        assert_eq!(
            css,
            "width: 100%; display: flex; flex-direction: column; box-sizing: border-box;"
        );
    }
}
