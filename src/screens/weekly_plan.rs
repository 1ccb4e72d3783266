use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    models::{
        notification::Notification,
        recipe::{PlannedRecipe, Recipe},
        week::{WeekPlan, WeekSlot},
    },
    screens::scope::ScreenScope,
    services::{
        notifications::Notifier,
        planner_api::PlannerApi,
        schedule::{self, Clock},
    },
};

pub const FETCH_FAILED: &str = "Erro ao buscar planejamento";

/// Weekly meal-plan viewer: the current week, one bucket per weekday.
pub struct WeeklyPlanScreen<A> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    scope: ScreenScope,
    plan: Vec<PlannedRecipe>,
    fetch_failed: bool,
}

impl<A: PlannerApi> WeeklyPlanScreen<A> {
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            notifier,
            clock,
            scope: ScreenScope::new(),
            plan: Vec::new(),
            fetch_failed: false,
        }
    }

    /// Handle that cancels this screen's in-flight work when the view goes away.
    pub fn scope(&self) -> ScreenScope {
        self.scope.clone()
    }

    /// Loads the plan once. Failures are reported through the notifier and
    /// leave the week empty.
    pub async fn mount(&mut self) {
        let Some(result) = self.scope.run(self.api.fetch_plan()).await else {
            tracing::debug!("Plan fetch finished after unmount; discarded");
            return;
        };

        match result {
            Ok(plan) => {
                tracing::info!("Loaded {} planned recipe(s)", plan.len());
                self.plan = plan;
                self.fetch_failed = false;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch plan: {}", e);
                self.fetch_failed = true;
                self.notifier.notify(Notification::failure(FETCH_FAILED));
            }
        }
    }

    pub fn unmount(&self) {
        self.scope.cancel();
    }

    /// Whether the last mount ended in the fetch-failure alert.
    pub fn fetch_failed(&self) -> bool {
        self.fetch_failed
    }

    pub fn records(&self) -> &[PlannedRecipe] {
        &self.plan
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn day(&self, slot: WeekSlot) -> Vec<PlannedRecipe> {
        schedule::bucket_for_slot(self.today(), slot, &self.plan)
    }

    pub fn week(&self) -> WeekPlan {
        schedule::bucket_week(self.today(), &self.plan)
    }

    /// Navigation hand-off to the recipe detail screen.
    pub fn select(&self, recipe_id: i64) -> Option<Recipe> {
        self.plan
            .iter()
            .find(|r| r.id == recipe_id)
            .map(Recipe::from)
    }
}

impl<A> Drop for WeeklyPlanScreen<A> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
