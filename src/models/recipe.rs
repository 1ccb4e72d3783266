use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: i64,
    pub nome: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantidade: String,
}

/// Utensils come either as a list or as a single free-text field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Utensils {
    List(Vec<String>),
    Text(String),
}

impl Default for Utensils {
    fn default() -> Self {
        Utensils::List(Vec::new())
    }
}

impl std::fmt::Display for Utensils {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Utensils::List(items) => write!(f, "{}", items.join(", ")),
            Utensils::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A recipe scheduled on a calendar date, as returned by GET /planejamento.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedRecipe {
    pub id: i64,
    pub titulo: String,
    /// Raw `YYYY-MM-DD` string; compared verbatim when bucketing.
    pub data: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub imagem: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tempo: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub porcoes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dificuldade: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredientes: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub utensilios: Utensils,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modo_preparo: String,
}

/// Read-only input of the recipe detail screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub imagem: String,
    pub titulo: String,
    pub tempo: String,
    pub porcoes: u32,
    pub dificuldade: String,
    pub ingredientes: Vec<Ingredient>,
    pub utensilios: Utensils,
    pub modo_preparo: String,
}

impl From<&PlannedRecipe> for Recipe {
    fn from(p: &PlannedRecipe) -> Self {
        Self {
            id: p.id,
            imagem: p.imagem.clone(),
            titulo: p.titulo.clone(),
            tempo: p.tempo.clone(),
            porcoes: p.porcoes,
            dificuldade: p.dificuldade.clone(),
            ingredientes: p.ingredientes.clone(),
            utensilios: p.utensilios.clone(),
            modo_preparo: p.modo_preparo.clone(),
        }
    }
}

/// Body for POST /adicionar-ingrediente.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIngredientRequest {
    pub ingrediente_id: i64,
}

/// Body for POST /adicionar-planejamento.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToPlanRequest {
    pub receita_id: i64,
    /// `YYYY-MM-DD`
    pub data: String,
}
