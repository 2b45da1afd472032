use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::{bert, distilbert};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Transformer family of a checkpoint, read from `config.json`'s `model_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Bert,
    DistilBert,
}

impl ModelKind {
    /// Maps a `model_type` value. A missing value means BERT.
    pub fn from_model_type(model_type: Option<&str>) -> Result<Self> {
        match model_type.map(str::to_ascii_lowercase).as_deref() {
            None | Some("bert") => Ok(Self::Bert),
            Some("distilbert") => Ok(Self::DistilBert),
            Some(other) => Err(candle::Error::Msg(format!(
                "unsupported model_type `{other}` (expected bert or distilbert)"
            ))),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bert => "bert",
            Self::DistilBert => "distilbert",
        })
    }
}

#[derive(Deserialize)]
struct ModelTypeField {
    model_type: Option<String>,
}

enum Backbone {
    Bert(bert::BertModel),
    DistilBert(distilbert::DistilBertModel),
}

/// BERT-family encoder with mean pooling, as laid out by sentence-transformers checkpoints.
pub struct SentenceModel {
    backbone: Backbone,
    kind: ModelKind,
    hidden_size: usize,
}

impl SentenceModel {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let parse_err =
            |e: serde_json::Error| candle::Error::Msg(format!("Failed to parse config: {}", e));

        let header: ModelTypeField = serde_json::from_str(&config_content).map_err(parse_err)?;
        let kind = ModelKind::from_model_type(header.model_type.as_deref())?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let (backbone, hidden_size) = match kind {
            ModelKind::Bert => {
                let config: bert::Config =
                    serde_json::from_str(&config_content).map_err(parse_err)?;
                // Fine-tuned checkpoints keep the `bert.` prefix, sentence-transformers exports drop it.
                let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
                    bert::BertModel::load(vb.pp("bert"), &config)?
                } else {
                    bert::BertModel::load(vb, &config)?
                };
                (Backbone::Bert(model), config.hidden_size)
            }
            ModelKind::DistilBert => {
                let config: distilbert::Config =
                    serde_json::from_str(&config_content).map_err(parse_err)?;
                let model = if vb.contains_tensor("distilbert.embeddings.word_embeddings.weight") {
                    distilbert::DistilBertModel::load(vb.pp("distilbert"), &config)?
                } else {
                    distilbert::DistilBertModel::load(vb, &config)?
                };
                (Backbone::DistilBert(model), config.dim)
            }
        };

        Ok(Self {
            backbone,
            kind,
            hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Runs the encoder on `[batch, seq]` ids and mean-pools over the attention mask.
    ///
    /// Returns `[batch, hidden]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = match &self.backbone {
            Backbone::Bert(model) => model.forward(input_ids, token_type_ids, Some(attention_mask))?,
            Backbone::DistilBert(model) => {
                // DistilBERT takes a blocking mask: non-zero marks positions to ignore.
                let (batch, seq_len) = attention_mask.dims2()?;
                let blocked = attention_mask.eq(0u32)?.reshape((batch, 1, 1, seq_len))?;
                model.forward(input_ids, &blocked)?
            }
        };

        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.maximum(1e-9)?;
        summed.broadcast_div(&counts)
    }
}
