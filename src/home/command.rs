//! Commands for the home screen's fetches.
//!
//! These commands perform the async directory calls and send results back
//! through the screen's message channel. A failed fetch becomes a
//! `*Failed` message, never a command error.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::core::Command;
use crate::directory::Directory;
use crate::home::message::HomeMsg;

/// Fetch the list of regions.
pub struct FetchRegionsCmd {
    directory: Arc<dyn Directory>,
    tx: UnboundedSender<HomeMsg>,
}

impl FetchRegionsCmd {
    pub fn new(directory: Arc<dyn Directory>, tx: UnboundedSender<HomeMsg>) -> Self {
        Self { directory, tx }
    }
}

#[async_trait]
impl Command for FetchRegionsCmd {
    fn name(&self) -> String {
        "Loading states".to_string()
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        match self.directory.list_regions().await {
            Ok(regions) => {
                let _ = self.tx.send(HomeMsg::RegionsLoaded(regions));
            }
            Err(e) => {
                let _ = self.tx.send(HomeMsg::RegionsFailed(e.to_string()));
            }
        }
        Ok(())
    }
}

/// Fetch the cities of one region.
///
/// Carries the fetch generation so the screen can discard the response if
/// the region changed again while this request was in flight.
pub struct FetchCitiesCmd {
    directory: Arc<dyn Directory>,
    code: String,
    generation: u64,
    tx: UnboundedSender<HomeMsg>,
}

impl FetchCitiesCmd {
    pub fn new(
        directory: Arc<dyn Directory>,
        code: String,
        generation: u64,
        tx: UnboundedSender<HomeMsg>,
    ) -> Self {
        Self {
            directory,
            code,
            generation,
            tx,
        }
    }
}

#[async_trait]
impl Command for FetchCitiesCmd {
    fn name(&self) -> String {
        format!("Loading cities of {}", self.code)
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        match self.directory.list_cities(&self.code).await {
            Ok(cities) => {
                let _ = self.tx.send(HomeMsg::CitiesLoaded {
                    generation: self.generation,
                    cities,
                });
            }
            Err(e) => {
                let _ = self.tx.send(HomeMsg::CitiesFailed {
                    generation: self.generation,
                    error: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Copy text to the system clipboard.
///
/// `arboard` is blocking, so the copy runs on the blocking pool.
pub struct CopySelectionCmd {
    text: String,
}

impl CopySelectionCmd {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl Command for CopySelectionCmd {
    fn name(&self) -> String {
        "Copying selection".to_string()
    }

    async fn execute(self: Box<Self>) -> color_eyre::Result<()> {
        let text = self.text;
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.set_text(text)?;
            Ok::<_, arboard::Error>(())
        })
        .await??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{City, DirectoryError, Region};
    use tokio::sync::mpsc;

    struct FakeDirectory {
        regions: Result<Vec<Region>, String>,
        cities: Result<Vec<City>, String>,
    }

    #[async_trait]
    impl Directory for FakeDirectory {
        async fn list_regions(&self) -> Result<Vec<Region>, DirectoryError> {
            match &self.regions {
                Ok(regions) => Ok(regions.clone()),
                Err(_) => Err(DirectoryError::Status(
                    reqwest::StatusCode::SERVICE_UNAVAILABLE,
                )),
            }
        }

        async fn list_cities(&self, _code: &str) -> Result<Vec<City>, DirectoryError> {
            match &self.cities {
                Ok(cities) => Ok(cities.clone()),
                Err(_) => Err(DirectoryError::Status(
                    reqwest::StatusCode::SERVICE_UNAVAILABLE,
                )),
            }
        }
    }

    fn fake(
        regions: Result<Vec<Region>, String>,
        cities: Result<Vec<City>, String>,
    ) -> Arc<dyn Directory> {
        Arc::new(FakeDirectory { regions, cities })
    }

    #[tokio::test]
    async fn test_fetch_regions_sends_loaded_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let directory = fake(
            Ok(vec![Region {
                code: "SP".to_string(),
            }]),
            Ok(vec![]),
        );

        Box::new(FetchRegionsCmd::new(directory, tx))
            .execute()
            .await
            .unwrap();

        match rx.try_recv().unwrap() {
            HomeMsg::RegionsLoaded(regions) => assert_eq!(regions[0].code, "SP"),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_regions_reports_failure_as_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let directory = fake(Err("boom".to_string()), Ok(vec![]));

        Box::new(FetchRegionsCmd::new(directory, tx))
            .execute()
            .await
            .unwrap();

        assert!(matches!(rx.try_recv().unwrap(), HomeMsg::RegionsFailed(_)));
    }

    #[tokio::test]
    async fn test_fetch_cities_tags_result_with_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let directory = fake(
            Ok(vec![]),
            Ok(vec![City {
                name: "Campinas".to_string(),
            }]),
        );

        Box::new(FetchCitiesCmd::new(directory, "SP".to_string(), 7, tx))
            .execute()
            .await
            .unwrap();

        match rx.try_recv().unwrap() {
            HomeMsg::CitiesLoaded { generation, cities } => {
                assert_eq!(generation, 7);
                assert_eq!(cities[0].name, "Campinas");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_cities_failure_keeps_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let directory = fake(Ok(vec![]), Err("down".to_string()));

        Box::new(FetchCitiesCmd::new(directory, "RJ".to_string(), 3, tx))
            .execute()
            .await
            .unwrap();

        match rx.try_recv().unwrap() {
            HomeMsg::CitiesFailed { generation, .. } => assert_eq!(generation, 3),
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
