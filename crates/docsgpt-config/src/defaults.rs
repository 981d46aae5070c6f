/// Public DocsGPT API used when no host is configured.
pub const DEFAULT_API_HOST: &str = "https://docsapi.arc53.com";

/// Embedding model the default document indexes are built with.
pub const DEFAULT_EMBEDDINGS_NAME: &str = "huggingface_sentence-transformers/all-mpnet-base-v2";

/// Viewport width (px) below which the navigation panel is treated as narrow.
pub const DEFAULT_NARROW_BREAKPOINT: u32 = 768;
