//! End-to-end flow over the bundled city directory: fan out, then sort,
//! page and export the aggregated rows.

use std::sync::Arc;

use search_client::testing::{row, rows, MockBackend};
use search_client::{
    to_csv, CityDirectory, ResultTable, SearchCriteria, SearchOrchestrator, SessionOutcome,
};

fn optometrists_in(state: &str) -> SearchCriteria {
    SearchCriteria {
        taxonomy: "Optometrist".to_string(),
        state_name: state.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_bundled_directory_drives_one_call_per_city() {
    let directory = Arc::new(CityDirectory::bundled().unwrap());
    let wyoming = directory.get("Wyoming").unwrap().clone();

    let backend = Arc::new(MockBackend::new().with_rows(&wyoming.cities[0], rows(500, 4)));
    let orch = SearchOrchestrator::new(backend.clone(), directory);

    let outcome = orch.run(optometrists_in("Wyoming")).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Completed { rows: 4 });
    let calls = backend.calls();
    assert_eq!(calls.len(), wyoming.cities.len());
    assert!(calls.iter().all(|c| c.state_code() == "WY"));
    assert!(calls.iter().all(|c| c.criteria().taxonomy == "Optometrist"));
    assert_eq!(orch.snapshot().progress(), 100.0);
}

#[tokio::test]
async fn test_results_sort_page_and_export() {
    let directory = Arc::new(
        CityDirectory::default().with_state("Wyoming", "WY", &["Cheyenne", "Casper"]),
    );
    let mut casper = rows(1000, 25);
    casper.push(row("2000", "AARON, \"DOC\" A"));
    let backend = Arc::new(
        MockBackend::new()
            .with_rows("Cheyenne", vec![row("3000", "ZED ZULU")])
            .with_rows("Casper", casper),
    );
    let orch = SearchOrchestrator::new(backend, directory);

    orch.run(optometrists_in("Wyoming")).await.unwrap();

    let mut table = ResultTable::new(orch.snapshot().rows);
    assert_eq!(table.len(), 27);
    assert_eq!(table.rows()[0].npi(), "3000");
    assert_eq!(table.page_count(), 2);

    table.set_page(2);
    table.sort_by_column(2);
    assert_eq!(table.page(), 1);
    assert_eq!(table.page_rows()[0].npi(), "2000");

    let csv = to_csv(table.rows()).unwrap();
    assert_eq!(csv.lines().count(), 28);
    assert!(csv.lines().nth(1).unwrap().starts_with("2000,N/A,\"AARON, \"\"DOC\"\" A\""));
}
