use postgen::collection::placeholders;
use postgen::config::Settings;
use postgen::context::ScaffoldContext;
use postgen::finalizer::Finalizer;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// 在 `<tmp>/<name>` 下运行收尾流程并返回生成的文档原文
fn generate(temp_dir: &TempDir, name: &str) -> String {
    let root = temp_dir.path().join(name);
    fs::create_dir(&root).unwrap();

    let ctx = ScaffoldContext::from_dir(&root).unwrap();
    Finalizer::new(ctx, Settings::default()).run().unwrap();

    fs::read_to_string(root.join("postman_collection.json")).unwrap()
}

fn parse(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

#[test]
fn test_group_and_request_counts() {
    let temp_dir = TempDir::new().unwrap();
    let doc = parse(&generate(&temp_dir, "my_cool_api"));

    let groups = doc["item"].as_array().unwrap();
    assert_eq!(groups.len(), 3);

    let names: Vec<&str> = groups.iter().map(|g| g["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Authentication", "Users", "Alternative Token Endpoints"]);

    let counts: Vec<usize> = groups
        .iter()
        .map(|g| g["item"].as_array().unwrap().len())
        .collect();
    assert_eq!(counts, vec![6, 3, 2]);
    assert_eq!(counts.iter().sum::<usize>(), 11);
}

#[test]
fn test_name_derived_info() {
    let temp_dir = TempDir::new().unwrap();
    let doc = parse(&generate(&temp_dir, "my_cool_api"));

    assert_eq!(doc["info"]["name"], "My Cool Api API");
    assert_eq!(doc["info"]["_postman_id"], "my_cool_api-api-collection");
    assert_eq!(
        doc["info"]["schema"],
        "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
    );
}

#[test]
fn test_variables() {
    let temp_dir = TempDir::new().unwrap();
    let doc = parse(&generate(&temp_dir, "shop"));

    assert_eq!(
        doc["variable"],
        serde_json::json!([
            {"key": "base_url", "value": "http://localhost:8000", "type": "string"},
            {"key": "access_token", "value": "", "type": "string"},
            {"key": "refresh_token", "value": "", "type": "string"}
        ])
    );
}

#[test]
fn test_placeholders_match_declared_variables() {
    let temp_dir = TempDir::new().unwrap();
    let doc = parse(&generate(&temp_dir, "shop"));

    let declared: Vec<&str> = doc["variable"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["key"].as_str().unwrap())
        .collect();

    let mut checked = 0;
    for group in doc["item"].as_array().unwrap() {
        for item in group["item"].as_array().unwrap() {
            let request = &item["request"];
            let mut texts = vec![request["url"]["raw"].as_str().unwrap()];
            for header in request["header"].as_array().unwrap() {
                texts.push(header["value"].as_str().unwrap());
            }
            for text in texts {
                for name in placeholders(text) {
                    assert!(declared.contains(&name), "undeclared variable {name}");
                    checked += 1;
                }
            }
        }
    }
    // 每个 URL 至少包含一个 {{base_url}}
    assert!(checked >= 11);
}

#[test]
fn test_request_shape() {
    let temp_dir = TempDir::new().unwrap();
    let doc = parse(&generate(&temp_dir, "shop"));

    for group in doc["item"].as_array().unwrap() {
        assert!(group["description"].is_string());
        for item in group["item"].as_array().unwrap() {
            assert!(item["name"].is_string());
            assert_eq!(item["response"], serde_json::json!([]));

            let request = &item["request"];
            assert!(["GET", "POST", "PATCH"].contains(&request["method"].as_str().unwrap()));
            assert_eq!(request["url"]["host"], serde_json::json!(["{{base_url}}"]));
            assert!(request["url"]["path"].is_array());

            if let Some(body) = request.get("body") {
                assert_eq!(body["mode"], "raw");
                // 请求体本身是合法的 JSON 文本
                let _: Value = serde_json::from_str(body["raw"].as_str().unwrap()).unwrap();
            }
        }
    }
}

#[test]
fn test_token_scripts() {
    let temp_dir = TempDir::new().unwrap();
    let doc = parse(&generate(&temp_dir, "shop"));

    let obtain = &doc["item"][0]["item"][1];
    assert_eq!(obtain["name"], "Obtain Token Pair");
    assert_eq!(obtain["request"]["url"]["raw"], "{{base_url}}/api/auth/jwt/create/");

    let event = &obtain["event"][0];
    assert_eq!(event["listen"], "test");
    assert_eq!(event["script"]["type"], "text/javascript");
    let exec: Vec<&str> = event["script"]["exec"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line.as_str().unwrap())
        .collect();
    assert!(exec.iter().any(|line| line.contains("\"access_token\"")));
    assert!(exec.iter().any(|line| line.contains("\"refresh_token\"")));

    // 不需要脚本的请求不输出 event 字段
    assert!(doc["item"][0]["item"][0].get("event").is_none());
}

#[test]
fn test_tab_indentation_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let raw = generate(&temp_dir, "shop");

    assert!(raw.starts_with("{\n\t\"info\": {\n\t\t\"_postman_id\""));
    assert!(raw.contains("\n\t\"variable\": [\n\t\t{\n\t\t\t\"key\": \"base_url\""));
}

#[test]
fn test_only_name_fields_differ_between_projects() {
    let temp_dir = TempDir::new().unwrap();
    let mut first = parse(&generate(&temp_dir, "my_cool_api"));
    let mut second = parse(&generate(&temp_dir, "billing-service"));

    assert_eq!(second["info"]["name"], "Billing Service API");
    assert_eq!(second["info"]["_postman_id"], "billing-service-api-collection");
    assert_ne!(first["info"]["description"], second["info"]["description"]);

    for doc in [&mut first, &mut second] {
        let info = doc["info"].as_object_mut().unwrap();
        info.remove("name");
        info.remove("_postman_id");
        info.remove("description");
    }
    assert_eq!(first, second);
}

#[test]
fn test_existing_file_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("shop");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("postman_collection.json"), "{\"stale\": true}").unwrap();

    let ctx = ScaffoldContext::from_dir(&root).unwrap();
    Finalizer::new(ctx, Settings::default()).run().unwrap();

    let doc = parse(&fs::read_to_string(root.join("postman_collection.json")).unwrap());
    assert!(doc.get("stale").is_none());
    assert_eq!(doc["info"]["name"], "Shop API");
}

#[test]
fn test_custom_base_url_and_file_name() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("shop");
    fs::create_dir(&root).unwrap();

    let mut settings = Settings::default();
    settings.collection.base_url = "https://api.shop.example".to_string();
    settings.collection.file_name = "shop.postman_collection.json".to_string();

    let ctx = ScaffoldContext::from_dir(&root).unwrap();
    Finalizer::new(ctx, settings).run().unwrap();

    let path = Path::new(&root).join("shop.postman_collection.json");
    let doc = parse(&fs::read_to_string(path).unwrap());
    assert_eq!(doc["variable"][0]["value"], "https://api.shop.example");
    assert!(!root.join("postman_collection.json").exists());
}
