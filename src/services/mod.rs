// Linkstash services
// Services provide functionality beyond plain storage: the LLM gateway and
// the summary-generation flow built on top of it.

pub mod llm_gateway;
