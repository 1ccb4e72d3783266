use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    models::{notification::Notification, recipe::Recipe},
    screens::scope::ScreenScope,
    services::{notifications::Notifier, planner_api::PlannerApi, schedule::Clock},
};

pub const SCHEDULE_FAILED: &str = "Erro ao adicionar receita ao planejamento";
pub const ADD_INGREDIENT_FAILED: &str = "Erro ao adicionar ingrediente à lista de compras";

/// Recipe detail viewer. The recipe is display input only; the two intents
/// each send exactly one request and report the outcome via the notifier.
pub struct RecipeDetailScreen<A> {
    recipe: Recipe,
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    scope: ScreenScope,
    show_date_picker: bool,
    selected_date: Option<NaiveDate>,
}

impl<A: PlannerApi> RecipeDetailScreen<A> {
    pub fn new(
        recipe: Recipe,
        api: Arc<A>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            recipe,
            api,
            notifier,
            clock,
            scope: ScreenScope::new(),
            show_date_picker: false,
            selected_date: None,
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn scope(&self) -> ScreenScope {
        self.scope.clone()
    }

    pub fn unmount(&self) {
        self.scope.cancel();
    }

    pub fn image_url(&self) -> String {
        self.api.image_url(&self.recipe.imagem)
    }

    /// `tempo` arrives as `HH:MM:SS`; only hours and minutes are shown.
    pub fn formatted_time(&self) -> String {
        format_time(&self.recipe.tempo)
    }

    pub fn servings_label(&self) -> String {
        format!("{} porções", self.recipe.porcoes)
    }

    pub fn ingredient_lines(&self) -> Vec<String> {
        self.recipe
            .ingredientes
            .iter()
            .map(|i| format!("{} - {}", i.nome, i.quantidade))
            .collect()
    }

    pub fn utensils_line(&self) -> String {
        self.recipe.utensilios.to_string()
    }

    pub fn is_date_picker_open(&self) -> bool {
        self.show_date_picker
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn open_date_picker(&mut self) {
        self.show_date_picker = true;
    }

    /// Initial value shown by the picker.
    pub fn date_picker_value(&self) -> NaiveDate {
        self.selected_date.unwrap_or_else(|| self.clock.today())
    }

    /// Picker result. The picker closes either way; a picked date is
    /// remembered and scheduled, a dismissal does nothing else.
    pub async fn on_date_picked(&mut self, date: Option<NaiveDate>) {
        self.show_date_picker = false;
        if let Some(date) = date {
            self.selected_date = Some(date);
            self.schedule_on(date).await;
        }
    }

    pub async fn schedule_on(&self, date: NaiveDate) {
        let recipe_id = self.recipe.id;
        let Some(result) = self.scope.run(self.api.add_to_plan(recipe_id, date)).await else {
            tracing::debug!("Scheduling recipe {} finished after unmount", recipe_id);
            return;
        };

        match result {
            Ok(()) => {
                tracing::info!("Scheduled recipe {} on {}", recipe_id, date);
                self.notifier.notify(Notification::success(format!(
                    "A receita \"{}\" foi adicionada ao planejamento semanal!",
                    self.recipe.titulo
                )));
            }
            Err(e) => {
                tracing::warn!("Failed to schedule recipe {} on {}: {}", recipe_id, date, e);
                self.notifier.notify(Notification::failure(SCHEDULE_FAILED));
            }
        }
    }

    pub async fn add_ingredient_to_list(&self, ingredient_id: i64, ingredient_name: &str) {
        let Some(result) = self.scope.run(self.api.add_ingredient(ingredient_id)).await else {
            tracing::debug!("Adding ingredient {} finished after unmount", ingredient_id);
            return;
        };

        match result {
            Ok(()) => {
                tracing::info!("Added ingredient {} to shopping list", ingredient_id);
                self.notifier.notify(Notification::success(format!(
                    "O ingrediente \"{ingredient_name}\" foi adicionado à sua lista de compras!"
                )));
            }
            Err(e) => {
                tracing::warn!("Failed to add ingredient {}: {}", ingredient_id, e);
                self.notifier.notify(Notification::failure(ADD_INGREDIENT_FAILED));
            }
        }
    }
}

impl<A> Drop for RecipeDetailScreen<A> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

fn format_time(tempo: &str) -> String {
    let mut parts = tempo.split(':');
    match (parts.next(), parts.next()) {
        (Some(hours), Some(minutes)) => format!("{hours}:{minutes}"),
        _ => tempo.to_string(),
    }
}
