//! # Pokémon Page
//!
//! Two independent loads: the featured ability's detail and the first page of the ability list.
//! Each fills its own [`Section`] as soon as its fetch ends, so one failing or stalling never
//! blanks or holds back the other.
//!
//! ```no_run
//! use product_desk::clients::PokeApiClient;
//! use product_desk::config::PokeApiConfig;
//! use product_desk::pokemon_page::PokemonPage;
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let config = PokeApiConfig::default();
//! let featured = config.featured_ability.clone();
//! let page = PokemonPage::start(Arc::new(PokeApiClient::new(config)), featured)
//!     .finish()
//!     .await;
//! println!("{:?}", page.detail);
//! # }
//! ```

use crate::clients::{AbilityApi, FetchError};
use crate::model::{AbilityDetail, NamedResource};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinError};
use tracing::{debug, info, warn};

/// Shown when a load task panicked or was aborted.
pub const GENERIC_ERROR: &str = "An error occurred";

/// Load status of one part of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "kebab-case")]
pub enum Section<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Section<T> {
    fn settle(outcome: Result<Result<T, FetchError>, JoinError>) -> Self {
        match outcome {
            Ok(Ok(value)) => Section::Ready(value),
            Ok(Err(e)) => {
                warn!(error = %e, "Fetch failed");
                Section::Failed(e.to_string())
            }
            Err(e) => {
                warn!(error = %e, "Fetch task did not complete");
                Section::Failed(GENERIC_ERROR.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Section::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonPage {
    /// PokeAPI name of the ability in the detail section.
    pub featured: String,
    pub detail: Section<AbilityDetail>,
    pub abilities: Section<Vec<NamedResource>>,
}

impl PokemonPage {
    /// The page before either load has finished.
    pub fn loading(featured: impl Into<String>) -> Self {
        Self {
            featured: featured.into(),
            detail: Section::Loading,
            abilities: Section::Loading,
        }
    }

    /// Spawns both loads. They run concurrently and each section is published as soon as its
    /// own fetch ends.
    pub fn start(api: Arc<dyn AbilityApi>, featured: impl Into<String>) -> PageLoad {
        let featured = featured.into();
        info!(%featured, "Loading Pokémon page");

        let (detail, detail_tasks) = {
            let api = Arc::clone(&api);
            let name = featured.clone();
            spawn_section("detail", async move { api.ability_detail(&name).await })
        };
        let (abilities, ability_tasks) = spawn_section("abilities", async move {
            api.list_abilities().await.map(|list| list.results)
        });

        PageLoad {
            featured,
            detail,
            abilities,
            tasks: detail_tasks.into_iter().chain(ability_tasks).collect(),
        }
    }

    /// Numbered rows for the ability list, or nothing while it is not ready.
    pub fn ability_rows(&self) -> Vec<AbilityRow> {
        self.abilities
            .ready()
            .map(|list| ability_rows(list.as_slice()))
            .unwrap_or_default()
    }
}

/// Runs `fetch` in its own task and publishes its outcome once it ends.
///
/// A relay task awaits the fetch, so a panicked fetch still settles as [`GENERIC_ERROR`].
fn spawn_section<T, F>(
    section: &'static str,
    fetch: F,
) -> (watch::Receiver<Section<T>>, [AbortHandle; 2])
where
    T: Send + Sync + 'static,
    F: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    let (publisher, receiver) = watch::channel(Section::Loading);
    let fetch = tokio::spawn(fetch);
    let fetch_abort = fetch.abort_handle();
    let relay = tokio::spawn(async move {
        let settled = Section::settle(fetch.await);
        debug!(section, ready = !matches!(settled, Section::Failed(_)), "Section settled");
        publisher.send_replace(settled);
    });
    (receiver, [fetch_abort, relay.abort_handle()])
}

/// In-flight loads of a [`PokemonPage`]. Dropping it aborts whatever is still running.
///
/// Each section is readable on its own: a slow or stalled fetch never holds back the other.
pub struct PageLoad {
    featured: String,
    detail: watch::Receiver<Section<AbilityDetail>>,
    abilities: watch::Receiver<Section<Vec<NamedResource>>>,
    tasks: Vec<AbortHandle>,
}

impl PageLoad {
    pub fn featured(&self) -> &str {
        &self.featured
    }

    /// The detail section as it stands now.
    pub fn detail(&self) -> Section<AbilityDetail> {
        self.detail.borrow().clone()
    }

    /// The ability list section as it stands now.
    pub fn abilities(&self) -> Section<Vec<NamedResource>> {
        self.abilities.borrow().clone()
    }

    /// The whole page as it stands now.
    pub fn snapshot(&self) -> PokemonPage {
        PokemonPage {
            featured: self.featured.clone(),
            detail: self.detail(),
            abilities: self.abilities(),
        }
    }

    /// Waits for the detail fetch only.
    pub async fn settled_detail(&mut self) -> Section<AbilityDetail> {
        settled(&mut self.detail).await
    }

    /// Waits for the ability list fetch only.
    pub async fn settled_abilities(&mut self) -> Section<Vec<NamedResource>> {
        settled(&mut self.abilities).await
    }

    /// Waits for both loads.
    pub async fn finish(mut self) -> PokemonPage {
        let (detail, abilities) =
            tokio::join!(settled(&mut self.detail), settled(&mut self.abilities));
        info!(
            featured = %self.featured,
            detail_ready = detail.ready().is_some(),
            abilities_ready = abilities.ready().is_some(),
            "Pokémon page loaded"
        );

        PokemonPage {
            featured: std::mem::take(&mut self.featured),
            detail,
            abilities,
        }
    }

    /// Aborts both loads.
    pub fn cancel(mut self) {
        info!(featured = %self.featured, "Pokémon page load cancelled");
        self.abort();
    }

    fn abort(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for PageLoad {
    fn drop(&mut self) {
        self.abort();
    }
}

async fn settled<T: Clone>(section: &mut watch::Receiver<Section<T>>) -> Section<T> {
    // the relay went away without publishing only if it was aborted
    section
        .wait_for(|s| !s.is_loading())
        .await
        .map(|s| s.clone())
        .unwrap_or_else(|_| Section::Failed(GENERIC_ERROR.to_string()))
}

/// One line of the ability list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityRow {
    /// Position in the list, starting at 1.
    pub number: usize,
    pub label: String,
    pub url: String,
}

pub fn ability_rows(list: &[NamedResource]) -> Vec<AbilityRow> {
    list.iter()
        .enumerate()
        .map(|(index, ability)| AbilityRow {
            number: index + 1,
            label: ability_label(&ability.name),
            url: ability.url.clone(),
        })
        .collect()
}

/// Heading for the featured ability: `battle-armor` becomes `BATTLE ARMOR`.
///
/// Only the first hyphen is replaced.
pub fn ability_title(name: &str) -> String {
    name.replacen('-', " ", 1).to_uppercase()
}

/// List label: `battle-armor` becomes `Battle Armor`.
///
/// Only the first hyphen is replaced; every space-separated word is capitalised.
pub fn ability_label(name: &str) -> String {
    name.replacen('-', " ", 1)
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::Endpoint;
    use crate::model::{AbilityList, EffectEntry, Language};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn named(name: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/ability/{name}/"),
        }
    }

    fn battle_armor() -> AbilityDetail {
        AbilityDetail {
            name: "battle-armor".to_string(),
            effect_entries: vec![EffectEntry {
                effect: "Protects against critical hits.".to_string(),
                language: Language {
                    name: "en".to_string(),
                },
            }],
        }
    }

    /// Answers from fixed results; `None` means a 500 from the server.
    struct CannedApi {
        list: Option<Vec<NamedResource>>,
        detail: Option<AbilityDetail>,
    }

    #[async_trait]
    impl AbilityApi for CannedApi {
        async fn list_abilities(&self) -> Result<AbilityList, FetchError> {
            match &self.list {
                Some(results) => Ok(AbilityList {
                    count: results.len() as u64,
                    next: None,
                    previous: None,
                    results: results.clone(),
                }),
                None => Err(FetchError::Status {
                    endpoint: Endpoint::AbilityList,
                    status: 500,
                }),
            }
        }

        async fn ability_detail(&self, name: &str) -> Result<AbilityDetail, FetchError> {
            match &self.detail {
                Some(detail) if detail.name == name => Ok(detail.clone()),
                _ => Err(FetchError::Status {
                    endpoint: Endpoint::AbilityDetail,
                    status: 404,
                }),
            }
        }
    }

    /// Never answers; drops `alive` when its futures are dropped.
    struct HangingApi {
        alive: Mutex<Option<oneshot::Sender<()>>>,
    }

    #[async_trait]
    impl AbilityApi for HangingApi {
        async fn list_abilities(&self) -> Result<AbilityList, FetchError> {
            let _guard = self.alive.lock().unwrap().take();
            std::future::pending().await
        }

        async fn ability_detail(&self, _name: &str) -> Result<AbilityDetail, FetchError> {
            std::future::pending().await
        }
    }

    /// The list request never answers; the detail answers at once.
    struct StalledListApi;

    #[async_trait]
    impl AbilityApi for StalledListApi {
        async fn list_abilities(&self) -> Result<AbilityList, FetchError> {
            std::future::pending().await
        }

        async fn ability_detail(&self, _name: &str) -> Result<AbilityDetail, FetchError> {
            Ok(battle_armor())
        }
    }

    struct PanickingListApi;

    #[async_trait]
    impl AbilityApi for PanickingListApi {
        async fn list_abilities(&self) -> Result<AbilityList, FetchError> {
            panic!("list exploded")
        }

        async fn ability_detail(&self, _name: &str) -> Result<AbilityDetail, FetchError> {
            Ok(battle_armor())
        }
    }

    #[test]
    fn test_title_and_label() {
        assert_eq!(ability_title("battle-armor"), "BATTLE ARMOR");
        assert_eq!(ability_label("battle-armor"), "Battle Armor");
        assert_eq!(ability_label("stench"), "Stench");
        // only the first hyphen is replaced
        assert_eq!(ability_title("a-b-c"), "A B-C");
        assert_eq!(ability_label("a-b-c"), "A B-c");
    }

    #[test]
    fn test_rows_are_numbered_from_one() {
        let rows = ability_rows(&[named("stench"), named("drizzle")]);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].label, "Stench");
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[1].label, "Drizzle");
    }

    #[test]
    fn test_loading_page() {
        let page = PokemonPage::loading("battle-armor");
        assert!(page.detail.is_loading());
        assert!(page.abilities.is_loading());
        assert!(page.ability_rows().is_empty());
    }

    #[tokio::test]
    async fn test_both_sections_ready() {
        let api = Arc::new(CannedApi {
            list: Some(vec![named("stench"), named("drizzle")]),
            detail: Some(battle_armor()),
        });

        let page = PokemonPage::start(api, "battle-armor").finish().await;

        assert_eq!(page.detail.ready(), Some(&battle_armor()));
        assert_eq!(page.ability_rows().len(), 2);
    }

    #[tokio::test]
    async fn test_list_failure_keeps_detail() {
        let api = Arc::new(CannedApi {
            list: None,
            detail: Some(battle_armor()),
        });

        let page = PokemonPage::start(api, "battle-armor").finish().await;

        assert_eq!(page.abilities.error(), Some("Failed to fetch abilities"));
        assert_eq!(
            page.detail.ready().map(|detail| detail.english_effect()),
            Some("Protects against critical hits.")
        );
    }

    #[tokio::test]
    async fn test_detail_failure_keeps_list() {
        let api = Arc::new(CannedApi {
            list: Some(vec![named("stench")]),
            detail: None,
        });

        let page = PokemonPage::start(api, "battle-armor").finish().await;

        assert_eq!(page.detail.error(), Some("Failed to fetch ability detail"));
        assert_eq!(page.ability_rows().len(), 1);
    }

    #[tokio::test]
    async fn test_panicked_task_becomes_generic_error() {
        let page = PokemonPage::start(Arc::new(PanickingListApi), "battle-armor")
            .finish()
            .await;

        assert_eq!(page.abilities.error(), Some(GENERIC_ERROR));
        assert!(page.detail.ready().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_list_does_not_hold_back_detail() {
        let mut load = PokemonPage::start(Arc::new(StalledListApi), "battle-armor");

        let detail = tokio::time::timeout(Duration::from_secs(3600), load.settled_detail())
            .await
            .expect("detail settles while the list is still loading");

        assert_eq!(detail.ready(), Some(&battle_armor()));
        assert!(load.abilities().is_loading());
        let page = load.snapshot();
        assert_eq!(page.detail, detail);
        assert!(page.ability_rows().is_empty());
        load.cancel();
    }

    #[tokio::test]
    async fn test_each_section_can_be_awaited_alone() {
        let api = Arc::new(CannedApi {
            list: None,
            detail: Some(battle_armor()),
        });
        let mut load = PokemonPage::start(api, "battle-armor");

        assert_eq!(
            load.settled_abilities().await.error(),
            Some("Failed to fetch abilities")
        );
        assert!(load.settled_detail().await.ready().is_some());
        assert!(load.detail().ready().is_some());
    }

    #[tokio::test]
    async fn test_cancel_drops_in_flight_requests() {
        let (alive, gone) = oneshot::channel();
        let api = Arc::new(HangingApi {
            alive: Mutex::new(Some(alive)),
        });

        let load = PokemonPage::start(api, "battle-armor");
        assert_eq!(load.featured(), "battle-armor");
        tokio::task::yield_now().await;
        load.cancel();

        // the sender is dropped once the aborted tasks release the api
        assert!(gone.await.is_err());
    }

    #[tokio::test]
    async fn test_page_serializes_sections() {
        let page = PokemonPage {
            featured: "battle-armor".to_string(),
            detail: Section::Failed("Failed to fetch ability detail".to_string()),
            abilities: Section::Ready(vec![named("stench")]),
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["detail"]["status"], "failed");
        assert_eq!(value["abilities"]["status"], "ready");
        assert_eq!(value["abilities"]["value"][0]["name"], "stench");
    }
}
