use crate::models::EncodedFile;
use crate::names;

use super::encoder;

/// Build the quiz generation instruction. Pure formatting, no validation.
pub fn quiz_prompt(main_topic: &str, sub_topics: &[String], files: &[EncodedFile]) -> String {
    let file_contents: String = files
        .iter()
        .map(|file| {
            format!(
                "File: {}\nContent: {}\n\n",
                file.name,
                encoder::prompt_content(file)
            )
        })
        .collect();

    format!(
        r#"You are an expert teacher creating a multiple choice quiz. Follow these guidelines:
1. Create concise, clear questions based on the provided documents
2. Generate exactly {options} options per question with exactly one right answer
3. Ensure options are similar in length and style
4. Mark the correct answer as A, B, C, D or E
5. Focus on key concepts from the documents
6. Create 2-3 questions per subtopic
7. Respond in valid JSON format that matches this schema:
[
  {{
    "question": "Question text here?",
    "options": ["Option A", "Option B", "Option C", "Option D", "Option E"],
    "answer": "A", // One of: A, B, C, D, E
    "explanation": "Explanation of why this answer is correct",
    "subtopic": 0 // Zero-based index into the subtopic list
  }},
  // More questions...
]

Create a multiple choice quiz covering:
Main Topic: {main_topic}
Subtopics: {sub_topics}

Use the content from these documents to create relevant questions:
{file_contents}"#,
        options = names::OPTION_COUNT,
        sub_topics = sub_topics.join(", "),
    )
}

/// Ask for a short title derived from the uploaded file names.
pub fn title_prompt(file_names: &[String]) -> String {
    format!(
        "Generate a title for a quiz based on the following file names. \
         Try and extract as much info from the file names as possible. \
         If the file names are just numbers or incoherent, just return {default}.\n\
         The title must be at most {words} words. \
         Respond only with JSON of the form {{\"title\": \"...\"}}.\n\n{names}",
        default = names::DEFAULT_TITLE.to_lowercase(),
        words = names::MAX_TITLE_WORDS,
        names = file_names.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadedFile;

    fn subs() -> Vec<String> {
        vec!["Anatomy".to_string(), "Mechanics of Breathing".to_string()]
    }

    #[test]
    fn quiz_prompt_contains_rules_topics_and_files() {
        let file = encoder::encode_file(&UploadedFile {
            name: "lungs.txt".to_string(),
            mime_type: "text/plain".to_string(),
            bytes: b"The diaphragm contracts during inhalation.".to_vec(),
        });

        let prompt = quiz_prompt("Respiratory System", &subs(), &[file]);

        for rule in 1..=7 {
            assert!(prompt.contains(&format!("\n{rule}. ")), "missing rule {rule}");
        }
        assert!(!prompt.contains("\n8. "));
        assert!(prompt.contains("exactly 5 options"));
        assert!(prompt.contains("Main Topic: Respiratory System"));
        assert!(prompt.contains("Subtopics: Anatomy, Mechanics of Breathing"));
        assert!(prompt
            .contains("File: lungs.txt\nContent: The diaphragm contracts during inhalation.\n\n"));
    }

    #[test]
    fn quiz_prompt_is_deterministic() {
        assert_eq!(
            quiz_prompt("Respiratory System", &subs(), &[]),
            quiz_prompt("Respiratory System", &subs(), &[])
        );
    }

    #[test]
    fn quiz_prompt_without_files_still_builds() {
        let prompt = quiz_prompt("Respiratory System", &subs(), &[]);
        assert!(prompt.ends_with("create relevant questions:\n"));
    }

    #[test]
    fn title_prompt_lists_file_names() {
        let prompt = title_prompt(&["bio_ch3.pdf".to_string(), "lungs.txt".to_string()]);
        assert!(prompt.contains("bio_ch3.pdf\nlungs.txt"));
        assert!(prompt.contains("at most 3 words"));
    }
}
