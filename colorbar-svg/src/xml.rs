use std::borrow::Cow;

use colorbar_common::types::{rgba_to_u8, Rgba};

/// Escape text for use in element content or a double-quoted attribute
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// `rgb(r,g,b)` for the color channels, alpha is emitted separately as an opacity
pub fn css_rgb(color: &Rgba) -> String {
    let [r, g, b, _] = rgba_to_u8(color);
    format!("rgb({r},{g},{b})")
}

/// Paint attribute plus a matching opacity attribute when the color is translucent
pub fn paint_attrs(name: &str, color: &Rgba) -> String {
    let alpha = color[3].clamp(0.0, 1.0);
    if alpha < 1.0 {
        format!(r#"{name}="{}" {name}-opacity="{alpha}""#, css_rgb(color))
    } else {
        format!(r#"{name}="{}""#, css_rgb(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("plain"), Cow::Borrowed("plain"));
        assert_eq!(
            escape_xml(r#"a<b & "c" 'd'>"#),
            "a&lt;b &amp; &quot;c&quot; &apos;d&apos;&gt;"
        );
    }

    #[test]
    fn test_paint_attrs() {
        assert_eq!(paint_attrs("fill", &[0.0, 0.0, 0.0, 1.0]), r#"fill="rgb(0,0,0)""#);
        assert_eq!(
            paint_attrs("stroke", &[1.0, 0.5, 0.0, 0.5]),
            r#"stroke="rgb(255,128,0)" stroke-opacity="0.5""#
        );
    }
}
