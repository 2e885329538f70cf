mod common;

use axum::http::StatusCode;
use serde_json::json;
use talentflow_mock::models::assessment::Assessment;
use talentflow_mock::models::response::Answers;
use talentflow_mock::services::assessment_rules::{validate_answers, visible_questions};

#[tokio::test]
async fn missing_assessment_reads_as_empty_default() {
    let (_, server) = common::seeded_server().await;

    let res = server.get("/assessments/999").await.unwrap();
    assert_eq!(res.status, StatusCode::OK);
    let assessment: Assessment = res.json().unwrap();
    assert_eq!(assessment.job_id, 999);
    assert!(assessment.sections.is_empty());
    assert!(assessment.conditions.is_empty());
}

#[tokio::test]
async fn seeded_assessment_round_trips_through_rules() {
    let (_, server) = common::seeded_server().await;

    let assessment: Assessment = server.get("/assessments/1").await.unwrap().json().unwrap();
    assert_eq!(assessment.questions().count(), 9);

    let mut answers = Answers::new();
    assert!(!visible_questions(&assessment, &answers).contains("q7"));
    answers.insert("q6".into(), json!("Yes"));
    assert!(visible_questions(&assessment, &answers).contains("q7"));

    answers.insert("q1".into(), json!("Yes"));
    answers.insert("q2".into(), json!(["Rust"]));
    answers.insert("q5".into(), json!(6));
    assert_eq!(validate_answers(&assessment, &answers), Ok(()));

    answers.insert("q5".into(), json!(60));
    assert!(validate_answers(&assessment, &answers).is_err());
}

#[tokio::test]
async fn put_replaces_whole_assessment() {
    let (_, server) = common::seeded_server().await;

    let res = server
        .put(
            "/assessments/2",
            json!({ "title": "Short form", "sections": [], "conditions": [] }),
        )
        .await
        .unwrap();
    assert_eq!(res.status, StatusCode::OK);

    let stored: Assessment = server.get("/assessments/2").await.unwrap().json().unwrap();
    assert_eq!(stored.job_id, 2);
    assert_eq!(stored.title, "Short form");
    assert!(stored.sections.is_empty());
    assert!(stored.conditions.is_empty());

    let malformed = server
        .put("/assessments/2", json!({ "sections": "nope" }))
        .await
        .unwrap();
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_accepts_every_question_kind() {
    let (_, server) = common::seeded_server().await;

    let body = json!({
        "jobId": 12,
        "title": "Builder",
        "sections": [{
            "id": "s1",
            "title": "All kinds",
            "questions": [
                { "id": "a", "type": "single", "label": "A", "required": true, "options": ["x", "y"] },
                { "id": "b", "type": "multi", "label": "B", "options": ["x"] },
                { "id": "c", "type": "text", "label": "C", "maxLength": 20 },
                { "id": "d", "type": "long", "label": "D" },
                { "id": "e", "type": "number", "label": "E", "min": 1, "max": 5 },
                { "id": "f", "type": "file", "label": "F" }
            ]
        }],
        "conditions": [{ "if": { "questionId": "a", "equals": "x" }, "show": ["c"] }]
    });
    let res = server.put("/assessments/12", body).await.unwrap();
    assert_eq!(res.status, StatusCode::OK);

    let stored = server.get("/assessments/12").await.unwrap();
    assert_eq!(stored.body["sections"][0]["questions"][2]["maxLength"], 20);
    assert_eq!(stored.body["sections"][0]["questions"][5]["type"], "file");
    assert_eq!(stored.body["conditions"][0]["if"]["questionId"], "a");
}

#[tokio::test]
async fn put_keeps_builder_fields_it_does_not_model() {
    let (_, server) = common::seeded_server().await;

    let body = json!({
        "jobId": 4,
        "title": "Screening",
        "description": "Ten minutes, no prep",
        "version": 3,
        "sections": [{
            "id": "s1",
            "title": "About you",
            "hint": "Be brief",
            "questions": [
                { "id": "a", "type": "text", "label": null, "required": false, "placeholder": "Your answer", "maxLength": 80 },
                { "id": "b", "type": "single", "label": "Pick", "required": true, "options": ["x"], "layout": { "columns": 2 } }
            ]
        }],
        "conditions": [{ "if": { "questionId": "b", "equals": "x" }, "show": ["a"], "note": "follow-up" }]
    });
    let res = server.put("/assessments/4", body.clone()).await.unwrap();
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, body);

    let stored = server.get("/assessments/4").await.unwrap();
    assert_eq!(stored.status, StatusCode::OK);
    assert_eq!(stored.body, body);
}

#[tokio::test]
async fn submit_is_last_write_wins() {
    let (state, server) = common::seeded_server().await;

    let first = server
        .post(
            "/assessments/1/submit",
            json!({ "candidateId": 5, "answers": { "q1": "Yes" } }),
        )
        .await
        .unwrap();
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, json!({ "ok": true }));

    server
        .post(
            "/assessments/1/submit",
            json!({ "candidateId": 5, "answers": { "q1": "No" } }),
        )
        .await
        .unwrap();

    let stored = state
        .assessment_service
        .response(1, &json!(5))
        .await
        .unwrap()
        .expect("stored response");
    assert_eq!(stored.answers.get("q1"), Some(&json!("No")));
    assert_eq!(state.store.keys(talentflow_mock::store::Collection::Responses).await.unwrap().len(), 1);

    let missing = server
        .post("/assessments/1/submit", json!({ "answers": {} }))
        .await
        .unwrap();
    assert_eq!(missing.status, StatusCode::OK);
    assert_eq!(missing.body, json!({ "ok": true }));
}

#[tokio::test]
async fn submit_accepts_any_candidate_id() {
    let (state, server) = common::seeded_server().await;

    for body in [
        json!({ "answers": { "q1": "Yes" } }),
        json!({ "candidateId": null, "answers": { "q1": "No" } }),
        json!({ "candidateId": "7", "answers": { "q1": "Yes" } }),
        json!({ "candidateId": 7, "answers": { "q5": 3 } }),
        json!({ "candidateId": "c-12" }),
    ] {
        let res = server.post("/assessments/2/submit", body).await.unwrap();
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({ "ok": true }));
    }

    // Missing and null share one key, as do 7 and "7".
    let keys = state
        .store
        .keys(talentflow_mock::store::Collection::Responses)
        .await
        .unwrap();
    assert_eq!(keys, vec!["2:7", "2:c-12", "2:null"]);

    let anonymous = state
        .assessment_service
        .response(2, &serde_json::Value::Null)
        .await
        .unwrap()
        .expect("anonymous response");
    assert_eq!(anonymous.answers, json!({ "q1": "No" }));

    let seven = state
        .assessment_service
        .response(2, &json!("7"))
        .await
        .unwrap()
        .expect("response for 7");
    assert_eq!(seven.candidate_id, json!(7));
    assert_eq!(seven.answers, json!({ "q5": 3 }));

    let bare = state
        .assessment_service
        .response(2, &json!("c-12"))
        .await
        .unwrap()
        .expect("response without answers");
    assert_eq!(bare.answers, json!({}));
}
