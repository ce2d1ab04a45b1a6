use serde::Serialize;

/// Per-million-token prices, kept as display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pricing {
    pub prompt: &'static str,
    pub completion: &'static str,
}

/// One selectable upstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
}

pub static AI_MODELS: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: "openai/gpt-4o",
        name: "GPT-4o",
        description: "Most advanced OpenAI model with vision and multimodal",
        pricing: Some(Pricing { prompt: "$2.50", completion: "$10.00" }),
    },
    ModelDescriptor {
        id: "openai/gpt-4o-mini",
        name: "GPT-4o Mini",
        description: "Affordable and intelligent small model",
        pricing: Some(Pricing { prompt: "$0.15", completion: "$0.60" }),
    },
    ModelDescriptor {
        id: "openai/gpt-4-turbo",
        name: "GPT-4 Turbo",
        description: "Latest GPT-4 with 128k context",
        pricing: Some(Pricing { prompt: "$10.00", completion: "$30.00" }),
    },
    ModelDescriptor {
        id: "openai/o1-preview",
        name: "OpenAI o1 Preview",
        description: "Advanced reasoning model for complex tasks",
        pricing: Some(Pricing { prompt: "$15.00", completion: "$60.00" }),
    },
    ModelDescriptor {
        id: "openai/o1-mini",
        name: "OpenAI o1 Mini",
        description: "Faster reasoning model, cost-effective",
        pricing: Some(Pricing { prompt: "$3.00", completion: "$12.00" }),
    },
    ModelDescriptor {
        id: "anthropic/claude-3.5-sonnet",
        name: "Claude 3.5 Sonnet",
        description: "Best combination of intelligence and speed",
        pricing: Some(Pricing { prompt: "$3.00", completion: "$15.00" }),
    },
    ModelDescriptor {
        id: "anthropic/claude-3-opus",
        name: "Claude 3 Opus",
        description: "Most powerful Claude model for complex tasks",
        pricing: Some(Pricing { prompt: "$15.00", completion: "$75.00" }),
    },
    ModelDescriptor {
        id: "anthropic/claude-3-sonnet",
        name: "Claude 3 Sonnet",
        description: "Balanced performance and speed",
        pricing: Some(Pricing { prompt: "$3.00", completion: "$15.00" }),
    },
    ModelDescriptor {
        id: "anthropic/claude-3-haiku",
        name: "Claude 3 Haiku",
        description: "Fastest and most compact Claude model",
        pricing: Some(Pricing { prompt: "$0.25", completion: "$1.25" }),
    },
    ModelDescriptor {
        id: "google/gemini-2.0-flash-exp:free",
        name: "Gemini 2.0 Flash (Free)",
        description: "Latest Gemini with multimodal - Free tier",
        pricing: Some(Pricing { prompt: "Free", completion: "Free" }),
    },
    ModelDescriptor {
        id: "google/gemini-pro-1.5",
        name: "Gemini Pro 1.5",
        description: "Google's advanced model with 1M context",
        pricing: Some(Pricing { prompt: "$1.25", completion: "$5.00" }),
    },
    ModelDescriptor {
        id: "google/gemini-flash-1.5",
        name: "Gemini Flash 1.5",
        description: "Fast and efficient multimodal model",
        pricing: Some(Pricing { prompt: "$0.075", completion: "$0.30" }),
    },
    ModelDescriptor {
        id: "meta-llama/llama-3.3-70b-instruct",
        name: "Llama 3.3 70B",
        description: "Latest open-source model with strong reasoning",
        pricing: Some(Pricing { prompt: "$0.59", completion: "$0.79" }),
    },
    ModelDescriptor {
        id: "meta-llama/llama-3.1-405b-instruct",
        name: "Llama 3.1 405B",
        description: "Largest open-source model available",
        pricing: Some(Pricing { prompt: "$2.70", completion: "$2.70" }),
    },
    ModelDescriptor {
        id: "meta-llama/llama-3.1-70b-instruct",
        name: "Llama 3.1 70B",
        description: "Powerful open-source 70B parameter model",
        pricing: Some(Pricing { prompt: "$0.52", completion: "$0.75" }),
    },
    ModelDescriptor {
        id: "mistralai/mistral-large",
        name: "Mistral Large",
        description: "Top-tier reasoning and coding capabilities",
        pricing: Some(Pricing { prompt: "$2.00", completion: "$6.00" }),
    },
    ModelDescriptor {
        id: "mistralai/mistral-medium",
        name: "Mistral Medium",
        description: "Balanced performance and cost",
        pricing: Some(Pricing { prompt: "$2.70", completion: "$8.10" }),
    },
    ModelDescriptor {
        id: "mistralai/mistral-small",
        name: "Mistral Small",
        description: "Cost-effective for most tasks",
        pricing: Some(Pricing { prompt: "$0.20", completion: "$0.60" }),
    },
    ModelDescriptor {
        id: "deepseek/deepseek-chat",
        name: "DeepSeek Chat",
        description: "Strong coding abilities, very cost-effective",
        pricing: Some(Pricing { prompt: "$0.14", completion: "$0.28" }),
    },
    ModelDescriptor {
        id: "deepseek/deepseek-coder",
        name: "DeepSeek Coder",
        description: "Specialized for coding tasks",
        pricing: Some(Pricing { prompt: "$0.14", completion: "$0.28" }),
    },
    ModelDescriptor {
        id: "qwen/qwen-2.5-72b-instruct",
        name: "Qwen 2.5 72B",
        description: "Strong performance across diverse tasks",
        pricing: Some(Pricing { prompt: "$0.35", completion: "$0.40" }),
    },
    ModelDescriptor {
        id: "qwen/qwen-2.5-coder-32b-instruct",
        name: "Qwen 2.5 Coder 32B",
        description: "Specialized coding model",
        pricing: Some(Pricing { prompt: "$0.14", completion: "$0.14" }),
    },
    ModelDescriptor {
        id: "x-ai/grok-beta",
        name: "Grok Beta",
        description: "X.AI's conversational AI with real-time data",
        pricing: Some(Pricing { prompt: "$5.00", completion: "$15.00" }),
    },
    ModelDescriptor {
        id: "perplexity/llama-3.1-sonar-large-128k-online",
        name: "Perplexity Sonar Large",
        description: "Search-augmented model with online access",
        pricing: Some(Pricing { prompt: "$1.00", completion: "$1.00" }),
    },
    ModelDescriptor {
        id: "cohere/command-r-plus",
        name: "Command R+",
        description: "Enterprise-grade with RAG capabilities",
        pricing: Some(Pricing { prompt: "$2.50", completion: "$10.00" }),
    },
];

/// The model selected when nothing has been stored yet.
pub fn default_model() -> &'static ModelDescriptor {
    &AI_MODELS[0]
}

pub fn find(id: &str) -> Option<&'static ModelDescriptor> {
    AI_MODELS.iter().find(|model| model.id == id)
}
