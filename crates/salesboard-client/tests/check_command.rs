mod support;

use serde_json::json;

use support::monthly_testkit::{fixture_dir, payload, run_check, write_fixture, write_fixture_json};

#[test]
fn clean_sources_report_no_issues() {
    let dir = fixture_dir("salesboard-check-clean");
    assert!(dir.is_ok());
    let Ok(dir) = dir else {
        return;
    };

    let sales = write_fixture(
        dir.path(),
        "sales.csv",
        "id,date,total_price,city,client_name\ns1,2024-01-05,100,,\n",
    );
    let expenses = write_fixture_json(
        dir.path(),
        "expenses.json",
        &json!([{"name": "Ads", "type": "instagram_ad", "price": 5, "created_at": "2024-01-06"}]),
    );
    assert!(sales.is_ok() && expenses.is_ok());
    let (Ok(sales), Ok(expenses)) = (sales, expenses) else {
        return;
    };

    let data = payload(run_check(Some(&sales), Some(&expenses)));
    assert_eq!(data["issues"], json!([]));
    assert_eq!(data["sales_source"]["rows_read"], 1);
    assert_eq!(data["sales_source"]["format"], "csv");
    assert_eq!(data["expenses_source"]["rows_valid"], 1);
}

#[test]
fn issues_are_returned_as_data() {
    let dir = fixture_dir("salesboard-check-issues");
    assert!(dir.is_ok());
    let Ok(dir) = dir else {
        return;
    };

    let sales = write_fixture_json(
        dir.path(),
        "sales.json",
        &json!([
            {"date": "2024-01-05", "totalPrice": 100},
            {"date": "05/01/2024", "totalPrice": 100},
            {"totalPrice": 100},
        ]),
    );
    let expenses = write_fixture_json(
        dir.path(),
        "expenses.json",
        &json!([{"type": "other", "price": 5, "created_at": "2024-01-06"}]),
    );
    assert!(sales.is_ok() && expenses.is_ok());
    let (Ok(sales), Ok(expenses)) = (sales, expenses) else {
        return;
    };

    let data = payload(run_check(Some(&sales), Some(&expenses)));
    assert_eq!(data["sales_source"]["rows_read"], 3);
    assert_eq!(data["sales_source"]["rows_valid"], 2);
    assert_eq!(
        data["issues"],
        json!([
            {"source": "sales", "row": 3, "field": "date",
             "message": "date must be present and non-empty."},
            {"source": "sales", "row": 2, "field": "date",
             "message": "date must be YYYY-MM-DD or an RFC 3339 timestamp; got \"05/01/2024\""},
            {"source": "expenses", "row": 1, "field": "name",
             "message": "name must be present when the expense type is `other`."},
        ])
    );
}

#[test]
fn csv_header_mismatch_is_an_error() {
    let dir = fixture_dir("salesboard-check-headers");
    assert!(dir.is_ok());
    let Ok(dir) = dir else {
        return;
    };

    let expenses = write_fixture(dir.path(), "expenses.csv", "id,name,amount\ne1,Ads,5\n");
    assert!(expenses.is_ok());
    let Ok(expenses) = expenses else {
        return;
    };

    let result = run_check(None, Some(&expenses));
    assert!(result.is_err());
    if let Err(error) = result {
        assert_eq!(error.code, "input_schema_mismatch");
    }
}

#[test]
fn csv_with_api_header_spellings_validates() {
    let dir = fixture_dir("salesboard-check-camel-headers");
    assert!(dir.is_ok());
    let Ok(dir) = dir else {
        return;
    };

    let sales = write_fixture(
        dir.path(),
        "sales.csv",
        "_id,date,totalPrice\ns1,2024-01-05,45000\n",
    );
    let expenses = write_fixture(
        dir.path(),
        "expenses.csv",
        "_id,name,type,price,createdAt\ne1,Ads,instagram_ad,5000,2024-01-10\n",
    );
    assert!(sales.is_ok() && expenses.is_ok());
    let (Ok(sales), Ok(expenses)) = (sales, expenses) else {
        return;
    };

    let data = payload(run_check(Some(&sales), Some(&expenses)));
    assert_eq!(data["issues"], json!([]));
    assert_eq!(data["sales_source"]["rows_valid"], 1);
    assert_eq!(data["expenses_source"]["rows_valid"], 1);
}
