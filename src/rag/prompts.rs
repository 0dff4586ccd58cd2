//! Prompt templates and fixed replies for legal question answering

use std::collections::HashMap;

/// Reply when retrieval found no documents for the question
pub const NO_RELEVANT_INFO_MESSAGE: &str =
    "ขออภัย ไม่พบข้อมูลกฎหมายที่เกี่ยวข้องกับคำถามของคุณ";

/// Reply when the model failed or produced no usable answer
pub const ANSWER_ERROR_MESSAGE: &str = "ขออภัย เกิดข้อผิดพลาดในการสร้างคำตอบ กรุณาลองใหม่อีกครั้ง";

/// Template with `{{name}}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template in a single pass.
    ///
    /// Substituted values are never rescanned, so a question containing `{{context}}`
    /// stays literal. Unknown placeholders are left as they are.
    #[must_use]
    pub fn render(&self, values: &HashMap<&str, &str>) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            match after_open.find("}}") {
                Some(end) => {
                    let name = &after_open[..end];
                    match values.get(name) {
                        Some(value) => result.push_str(value),
                        None => {
                            result.push_str("{{");
                            result.push_str(name);
                            result.push_str("}}");
                        }
                    }
                    rest = &after_open[end + 2..];
                }
                None => {
                    result.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        result.push_str(rest);
        result
    }

    /// Get required variables
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract variable names from template
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };
        let name = &after_open[..end];
        if !name.is_empty() && !variables.iter().any(|v| v == name) {
            variables.push(name.to_string());
        }
        rest = &after_open[end + 2..];
    }

    variables
}

/// Standard legal prompt templates
pub struct LegalPrompts;

impl LegalPrompts {
    /// Grounded answer: answer only the question, only from the context, cite sections
    #[must_use]
    pub fn grounded_answer() -> PromptTemplate {
        PromptTemplate::new(
            r"คุณเป็นผู้ช่วยด้านกฎหมายไทย จงตอบเฉพาะคำถามด้านล่างนี้เท่านั้น
โดยใช้ข้อมูลกฎหมายที่ให้มาเป็นหลักฐานอ้างอิงเพียงอย่างเดียว และระบุเลขมาตราที่ใช้อ้างอิงทุกครั้ง
หากข้อมูลที่ให้มาไม่เพียงพอที่จะตอบ ให้แจ้งว่าไม่มีข้อมูลเพียงพอ ห้ามแต่งข้อมูลขึ้นเอง

ข้อมูลกฎหมาย:
{{context}}

คำถาม: {{question}}

คำตอบ:",
        )
    }

    /// Render the grounded-answer prompt
    #[must_use]
    pub fn render_grounded_answer(question: &str, context: &str) -> String {
        let values = HashMap::from([("question", question), ("context", context)]);
        Self::grounded_answer().render(&values)
    }
}
