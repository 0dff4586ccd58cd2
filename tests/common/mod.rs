//! In-process fakes for the pipeline's external capabilities

#![allow(dead_code)]

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use lexsearch::embeddings::Embedder;
use lexsearch::llm::ChatRequest;
use lexsearch::llm::Generator;
use lexsearch::models::DocumentRecord;
use lexsearch::rag::LegalSearchPipeline;
use lexsearch::rag::PipelineOptions;
use lexsearch::store::VectorStore;
use lexsearch::LexSearchError;
use lexsearch::Result;

pub const DIM: usize = 8;

/// Deterministic embedder: a vector derived from the text's bytes
pub struct FakeEmbedder {
    pub dimension: usize,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self {
            dimension: DIM,
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(LexSearchError::EmbeddingError(
                "embedding service unreachable".to_string(),
            ));
        }
        let mut vector = vec![0.0; self.dimension];
        for (i, b) in text.bytes().enumerate() {
            vector[i % self.dimension] += f32::from(b) / 255.0;
        }
        Ok(vector)
    }
}

/// Store returning a fixed, similarity-ordered result set
pub struct FakeStore {
    pub records: Vec<DocumentRecord>,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub requested: Mutex<Vec<usize>>,
}

impl FakeStore {
    pub fn with_records(records: Vec<DocumentRecord>) -> Self {
        Self {
            records,
            fail: false,
            delay: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_records(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl VectorStore for FakeStore {
    async fn match_documents(
        &self,
        _query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<DocumentRecord>> {
        self.requested.lock().unwrap().push(match_count);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(LexSearchError::RetrievalError(
                "relation \"documents\" does not exist".to_string(),
            ));
        }
        Ok(self.records.iter().take(match_count).cloned().collect())
    }
}

pub enum GeneratorBehaviour {
    Answer(String),
    Empty,
    Fail,
    Hang,
}

/// Generator recording the prompts it receives
pub struct FakeGenerator {
    pub behaviour: GeneratorBehaviour,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl FakeGenerator {
    pub fn new(behaviour: GeneratorBehaviour) -> Self {
        Self {
            behaviour,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::new(GeneratorBehaviour::Answer(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.requests.lock().unwrap().last().unwrap().messages[0]
            .content
            .clone()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, request: &ChatRequest) -> Result<Option<String>> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.behaviour {
            GeneratorBehaviour::Answer(text) => Ok(Some(text.clone())),
            GeneratorBehaviour::Empty => Ok(None),
            GeneratorBehaviour::Fail => Err(LexSearchError::LlmError(
                "connection reset by peer".to_string(),
            )),
            GeneratorBehaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Some("too late".to_string()))
            }
        }
    }
}

pub fn record(id: u32, section: i64, law_type: &str, content: &str, similarity: f64) -> DocumentRecord {
    DocumentRecord {
        id: Some(id.to_string()),
        content: Some(content.to_string()),
        title: Some(format!("{law_type} มาตรา {section}")),
        section: Some(section),
        law_type: Some(law_type.to_string()),
        similarity: Some(similarity),
    }
}

/// Three civil-law passages, all above the default threshold
pub fn civil_records() -> Vec<DocumentRecord> {
    vec![
        record(1, 420, "ประมวลกฎหมายแพ่งและพาณิชย์", "ผู้ใดจงใจหรือประมาทเลินเล่อ ทำต่อบุคคลอื่นโดยผิดกฎหมาย", 0.91),
        record(2, 438, "ประมวลกฎหมายแพ่งและพาณิชย์", "ค่าสินไหมทดแทนจะพึงใช้โดยสถานใดเพียงใดนั้น", 0.74),
        record(3, 448, "ประมวลกฎหมายแพ่งและพาณิชย์", "สิทธิเรียกร้องค่าเสียหายอันเกิดแต่มูลละเมิดขาดอายุความ", 0.52),
    ]
}

pub fn options() -> PipelineOptions {
    PipelineOptions {
        embedding_dimension: Some(DIM),
        embed_timeout: Duration::from_secs(5),
        retrieval_timeout: Duration::from_secs(5),
        synthesis_timeout: Duration::from_secs(5),
        ..PipelineOptions::default()
    }
}

pub struct Harness {
    pub embedder: Arc<FakeEmbedder>,
    pub store: Arc<FakeStore>,
    pub generator: Arc<FakeGenerator>,
    pub pipeline: LegalSearchPipeline,
}

pub fn harness(embedder: FakeEmbedder, store: FakeStore, generator: FakeGenerator) -> Harness {
    harness_with_options(embedder, store, generator, options())
}

pub fn harness_with_options(
    embedder: FakeEmbedder,
    store: FakeStore,
    generator: FakeGenerator,
    options: PipelineOptions,
) -> Harness {
    lexsearch::logging::init_simple_logging();

    let embedder = Arc::new(embedder);
    let store = Arc::new(store);
    let generator = Arc::new(generator);
    let pipeline = LegalSearchPipeline::new(
        embedder.clone(),
        store.clone(),
        generator.clone(),
        options,
    );
    Harness {
        embedder,
        store,
        generator,
        pipeline,
    }
}
