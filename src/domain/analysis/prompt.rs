//! Backend instruction prompts

/// An instruction sent to the generative backend.
/// Each pipeline operation builds its own prompt; the backend sees
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Instruction to locate a video's content online and reconstruct its
    /// transcript. When no authoritative source turns up, the backend is
    /// told to produce a plausible transcript instead of failing; the
    /// fabrication clause is intentional.
    pub fn transcript_search(source_url: &str) -> Self {
        let content = format!(
            r#"You are an expert at finding and creating podcast transcripts from YouTube videos. A user has provided a YouTube URL.
Using Google Search, find the content, subtitles, or a detailed summary of the video at the given URL.
Based on your search results, construct a comprehensive and accurate transcript of the video.
If you cannot find a direct transcript, create a plausible and detailed transcript based on the video's title, description, and any summaries you find.
Respond ONLY with the transcript text itself, without any introduction or explanation.

YouTube URL:
---
{source_url}
---
"#
        );
        Self { content }
    }

    /// Instruction for a literal full-text translation that preserves
    /// structure and meaning
    pub fn translation(text: &str, language: &str) -> Self {
        let content = format!(
            r#"Translate the following podcast transcript into {language}. Maintain the structure and meaning of the original text. Respond only with the translated text, without any additional commentary or introduction.

Transcript:
---
{text}
---
"#
        );
        Self { content }
    }

    /// Instruction for a concise summary localized to the given language
    pub fn summary(text: &str, language: &str) -> Self {
        let content = format!(
            r#"You are an expert podcast summarizer. Your task is to create a concise, easy-to-read summary of the provided transcript. The summary should capture the main topics, key points, and conclusions. The final output must be in {language}.

Transcript:
---
{text}
---
"#
        );
        Self { content }
    }

    /// Instruction to answer a question strictly from the supplied context,
    /// stating inability when the context is insufficient
    pub fn grounded_answer(context: &str, question: &str, language: &str) -> Self {
        let content = format!(
            r#"You are a helpful AI assistant. Based ONLY on the following context, answer the user's question.
If the answer is not found within the context, state that you cannot find the answer in the provided text.
The final answer must be in {language}.

Context:
---
{context}
---

Question:
{question}
"#
        );
        Self { content }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the content
    pub fn into_content(self) -> String {
        self.content
    }
}
