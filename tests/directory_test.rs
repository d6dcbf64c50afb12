use anyhow::Result;
use hospital_directory::{
    CsvFileSource, Directory, DirectoryError, HospitalRecord, MemoryRowSource, Pipeline,
    QueryResult, SearchQuery, SharedDirectory,
};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "Sr_No,Hospital_Name,Discipline_Systems_of_Medicine,Hospital_Category,Hospital_Care_Type,Specialties,Total_Num_Beds,Number_Doctor,State,District,Subdistrict";

fn write_csv(rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok(file)
}

async fn load_csv(rows: &[&str]) -> Result<Directory> {
    let file = write_csv(rows)?;
    let (directory, _) = Pipeline::default()
        .load_directory(&CsvFileSource::new(file.path()))
        .await?;
    Ok(directory)
}

fn city_general(category: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Hospital_Name", "City General Hospital".to_string()),
        ("Discipline_Systems_of_Medicine", "Allopathy".to_string()),
        ("Hospital_Category", category.to_string()),
        ("Total_Num_Beds", "50".to_string()),
        ("Number_Doctor", "10".to_string()),
        ("State", "Maharashtra".to_string()),
        ("District", "Pune".to_string()),
    ]
}

fn source_of(rows: Vec<Vec<(&'static str, String)>>) -> MemoryRowSource {
    MemoryRowSource::new(
        rows.into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(k, v)| (k.to_string(), Some(v)))
                    .collect()
            })
            .collect(),
    )
}

#[tokio::test]
async fn test_qualifying_row_is_served_everywhere() -> Result<()> {
    let (directory, result) = Pipeline::default()
        .load_directory(&source_of(vec![city_general("General")]))
        .await?;

    assert_eq!(result.accepted, 1);
    assert_eq!(directory.by_state("maharashtra")?.len(), 1);
    assert_eq!(directory.by_district("Pune", None)?.len(), 1);
    assert!(directory.states().contains(&"Maharashtra".to_string()));
    assert!(directory.districts().contains(&"Pune".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_nursing_home_row_is_never_served() -> Result<()> {
    let (directory, result) = Pipeline::default()
        .load_directory(&source_of(vec![city_general("Nursing Home")]))
        .await?;

    assert_eq!(result.rejected, 1);
    assert!(directory.list_all().is_empty());
    assert!(directory.by_state("Maharashtra")?.is_empty());
    assert!(directory.search(&SearchQuery::new("City General"))?.is_empty());
    assert!(directory.states().is_empty());
    assert!(directory.districts().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_rejected_row_does_not_hide_values_from_accepted_rows() -> Result<()> {
    let (directory, _) = Pipeline::default()
        .load_directory(&source_of(vec![
            city_general("Nursing Home"),
            city_general("General"),
        ]))
        .await?;

    assert_eq!(directory.states(), vec!["Maharashtra"]);
    assert_eq!(directory.districts(), vec!["Pune"]);
    Ok(())
}

#[tokio::test]
async fn test_csv_placeholders_and_thresholds() -> Result<()> {
    let directory = load_csv(&[
        "1,Eleven Bed Hospital,Allopathy,General,0,0,11,3,Goa,North Goa,Bardez",
        "2,Ten Bed Hospital,Allopathy,General,,,10,5,Goa,North Goa,Bardez",
        "3,Rainbow Children Hospital,Allopathy,General,,,200,40,Goa,North Goa,Tiswadi",
        "4,No Doctors Hospital,Allopathy,General,,,80,0,Goa,North Goa,Tiswadi",
        "5, Padded Hospital ,  Allopathy ,General,,,30,4, Goa , South Goa ,Salcete",
    ])
    .await?;

    let ids: Vec<_> = directory.list_all().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["1", "5"]);

    let padded = directory.by_id("5")?;
    assert_eq!(padded.name, "Padded Hospital");
    assert_eq!(padded.district, "South Goa");

    let eleven = directory.by_id("1")?;
    assert_eq!(eleven.care_type, "");
    assert_eq!(eleven.specialties, "");
    Ok(())
}

#[tokio::test]
async fn test_district_locality_partition_and_search_ranking() -> Result<()> {
    let directory = load_csv(&[
        "10,Sahyadri Hospital,Allopathy,General,,,100,20,Maharashtra,Pune,Haveli",
        "11,Ruby Hall,Allopathy,General,,,300,60,Maharashtra,Pune,Pune City",
        "12,Jehangir Hospital,Allopathy,General,,,250,50,Maharashtra,Pune,Haveli",
        "13,Deenanath Hospital,Allopathy,General,,,400,80,Maharashtra,Pune,Pune City",
        "14,Hospital,Allopathy,General,,,20,5,Maharashtra,Pune,Mulshi",
        "15,KEM Hospital,Allopathy,General,,,500,90,Maharashtra,Mumbai,Parel",
    ])
    .await?;

    let partitioned: Vec<_> = directory
        .by_district("PUNE", Some("pune city"))?
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(partitioned, vec!["11", "13", "10", "12", "14"]);

    let ranked: Vec<_> = directory
        .search(&SearchQuery::new("hospital").with_locality("haveli"))?
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ranked, vec!["12", "10"]);

    let exact_first: Vec<_> = directory
        .search(&SearchQuery::new("hospital").with_district("pune"))?
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(exact_first, vec!["14", "13", "12", "10"]);

    assert_eq!(directory.districts_for_state("Maharashtra")?, vec!["Mumbai", "Pune"]);
    Ok(())
}

#[tokio::test]
async fn test_lookup_errors() -> Result<()> {
    let directory = load_csv(&[
        "20,Civil Hospital,Allopathy,General,,,150,25,Kerala,Ernakulam,Kochi",
    ])
    .await?;

    assert_eq!(directory.by_id("20")?.name, "Civil Hospital");
    let missing: QueryResult<HospitalRecord> = directory.by_id("21");
    assert!(matches!(missing, Err(DirectoryError::NotFound { .. })));
    assert!(matches!(
        directory.by_locality("  "),
        Err(DirectoryError::InvalidArgument { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_missing_csv_leaves_directory_empty() {
    let shared = SharedDirectory::new();
    let source = CsvFileSource::new("/nonexistent/hospital_directory.csv");

    let err = Pipeline::default().load_into(&source, &shared).await.unwrap_err();

    assert!(matches!(err, DirectoryError::SourceUnavailable { .. }));
    assert!(shared.current().list_all().is_empty());
}
