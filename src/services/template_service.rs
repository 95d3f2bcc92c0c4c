use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSection {
    pub title: String,
    pub questions: Vec<String>,
}

/// A read-only questionnaire as shown in the template preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub title: String,
    pub display_title: String,
    pub sections: Vec<TemplateSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

struct TemplateDefinition {
    title: &'static str,
    sections: &'static [(&'static str, &'static [&'static str])],
    options: Option<&'static [&'static str]>,
}

const GAD_7: TemplateDefinition = TemplateDefinition {
    title: "GAD-7 (Generalized Anxiety Disorder)",
    sections: &[(
        "Over the last 2 weeks, how often have you been bothered by the following problems?",
        &[
            "Feeling nervous, anxious, or on edge.",
            "Not being able to stop or control worrying.",
            "Worrying too much about different things.",
            "Trouble relaxing.",
        ],
    )],
    options: Some(&["Not at all", "Several days", "Over half the days", "Nearly every day"]),
};

const PLACEHOLDER: TemplateDefinition = TemplateDefinition {
    title: "",
    sections: &[(
        "Template Preview",
        &["This is a placeholder preview for the template content."],
    )],
    options: None,
};

const LIBRARY: &[TemplateDefinition] = &[GAD_7];

/// Titles of every template with real content
pub fn titles() -> Vec<&'static str> {
    LIBRARY.iter().map(|t| t.title).collect()
}

/// Preview for `title`; unknown titles get the placeholder content under the requested title
pub fn preview(title: &str) -> TemplatePreview {
    let definition = LIBRARY.iter().find(|t| t.title == title).unwrap_or(&PLACEHOLDER);

    TemplatePreview {
        title: title.to_string(),
        display_title: display_title(title).to_string(),
        sections: definition
            .sections
            .iter()
            .map(|(section_title, questions)| TemplateSection {
                title: section_title.to_string(),
                questions: questions.iter().map(|q| q.to_string()).collect(),
            })
            .collect(),
        options: definition
            .options
            .map(|options| options.iter().map(|o| o.to_string()).collect()),
    }
}

/// "GAD-7 (Generalized Anxiety Disorder)" -> "GAD-7"
fn display_title(title: &str) -> &str {
    title.split(" (").next().unwrap_or(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gad7_has_four_questions_and_options() {
        let preview = preview("GAD-7 (Generalized Anxiety Disorder)");
        assert_eq!(preview.display_title, "GAD-7");
        assert_eq!(preview.sections.len(), 1);
        assert_eq!(preview.sections[0].questions.len(), 4);
        assert_eq!(preview.options.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn unknown_title_gets_placeholder() {
        let preview = preview("PHQ-9 (Patient Health Questionnaire)");
        assert_eq!(preview.title, "PHQ-9 (Patient Health Questionnaire)");
        assert_eq!(preview.display_title, "PHQ-9");
        assert_eq!(preview.sections[0].title, "Template Preview");
        assert!(preview.options.is_none());
    }

    #[test]
    fn placeholder_omits_options_in_json() {
        let json = serde_json::to_value(preview("Anything")).unwrap();
        assert!(json.get("options").is_none());
        assert_eq!(json["displayTitle"], "Anything");
    }

    #[test]
    fn library_lists_gad7() {
        assert_eq!(titles(), vec!["GAD-7 (Generalized Anxiety Disorder)"]);
    }
}
