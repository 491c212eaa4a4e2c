//! Source → destination field pairs used to translate ESL rows into the SIG
//! layout.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::frete::tools::error::{Result, ToolError};

/// Built-in pairs, in the order the columns are filled.
pub const DEFAULT_FIELD_MAPPING: &[(&str, &str)] = &[
    ("NM NF NCTE", "Número CT-e"),
    ("nº de referência", "Número Coleta"),
    ("Classificação", "Tipo Movimento"),
    ("Remetente", "Remetente"),
    ("Cidade Remetente", "Cidade Remetente"),
    ("Cidade Origem", "Cidade Origem"),
    ("Bairro Remetente", "Bairro Remetente"),
    ("Destinatário", "Destinatário"),
    ("Cidade Destinatária", "Cidade Destinatário"),
    ("Bairro Destinatário", "Bairro Destinatário"),
    ("Cidade Destino", "Cidade Destino"),
    ("Tabela de Preço", "Tabela de Preço"),
    ("Nota Fiscal", "Nota Fiscal"),
    ("Valor NF", "Valor N.F."),
    ("CFOP", "CFOP"),
    ("Volume", "Volume"),
    ("Peso Taxado", "Peso Taxado"),
    ("Peso Real", "Peso Real"),
    ("Frete Peso", "Frete Peso"),
    ("AD Valorem", "ADValorem"),
    ("Natureza", "Natureza"),
    ("Emissão CT-e", "Emissão CT-e"),
    ("CNPJ Pagador", "CPF/CNPJ Faturado"),
    ("Pagador de Frete", "Cliente Faturado"),
    ("Total Frete", "Valor Frete"),
    ("%Imposto", "Taxa ICMS"),
    ("Valor Imposto", "Valor ICMS"),
    ("Outros Valores", "Outros"),
    ("Valor Pedágio", "Pedágio"),
];

/// One source field of the ESL export and the SIG column it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPair {
    pub source: String,
    pub destination: String,
}

/// Ordered field mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pairs: Vec<FieldPair>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FieldMapping {
    /// The mapping shipped with the tool.
    pub fn builtin() -> Self {
        let pairs = DEFAULT_FIELD_MAPPING
            .iter()
            .map(|(source, destination)| FieldPair {
                source: (*source).to_string(),
                destination: (*destination).to_string(),
            })
            .collect();
        Self { pairs }
    }

    /// Builds a mapping from explicit pairs, rejecting empty tables, blank
    /// names and repeated sources.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut seen = HashSet::new();
        let mut validated = Vec::new();

        for (source, destination) in pairs {
            if source.trim().is_empty() || destination.trim().is_empty() {
                return Err(ToolError::InvalidMapping(format!(
                    "blank field name in pair ('{source}', '{destination}')"
                )));
            }
            if !seen.insert(source.clone()) {
                return Err(ToolError::InvalidMapping(format!(
                    "source field '{source}' mapped more than once"
                )));
            }
            validated.push(FieldPair {
                source,
                destination,
            });
        }

        if validated.is_empty() {
            return Err(ToolError::InvalidMapping("mapping is empty".into()));
        }

        Ok(Self { pairs: validated })
    }

    /// Loads a mapping override stored as a JSON array of
    /// `[source, destination]` pairs.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let pairs: Vec<(String, String)> = serde_json::from_str(&source)?;
        let mapping = Self::from_pairs(pairs)?;
        info!(
            path = %path.display(),
            pairs = mapping.len(),
            "loaded field mapping override"
        );
        Ok(mapping)
    }

    pub fn pairs(&self) -> &[FieldPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
