use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub title_font_size: f32,
    pub process_fill: String,
    pub decision_fill: String,
    pub terminator_fill: String,
    pub border_color: String,
    pub text_color: String,
    pub line_color: String,
    pub background: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 16.0,
            title_font_size: 22.0,
            process_fill: "#ECECFF".to_string(),
            decision_fill: "#FFF5CC".to_string(),
            terminator_fill: "#D6EFD6".to_string(),
            border_color: "#9370DB".to_string(),
            text_color: "#333333".to_string(),
            line_color: "#333333".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            title_font_size: 18.0,
            process_fill: "#F8FAFF".to_string(),
            decision_fill: "#FFF8E8".to_string(),
            terminator_fill: "#EEF7EE".to_string(),
            border_color: "#C7D2E5".to_string(),
            text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}
