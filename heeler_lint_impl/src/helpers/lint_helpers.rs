// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Message formatting shared by the lint rules.

///
/// Interpolates `{{key}}` placeholders in a message template from a flat
/// key/value list. Placeholders with no matching key are left verbatim,
/// so a template typo shows up in the rendered message instead of
/// vanishing silently.
///
pub fn interpolate_message(template: &str, data: &[(&str, String)]) -> String {
    let mut message = template.to_string();
    for (key, value) in data {
        message = message.replace(&format!("{{{{{key}}}}}"), value);
    }
    message
}
