use super::*;
use crate::errors::OpenerError;
use crate::github::cli::{create_args, MockGitHubCli};
use std::sync::{Arc, Mutex};

fn request(title: &str, body: &str) -> PullRequestRequest {
    PullRequestRequest {
        title: title.to_string(),
        body: body.to_string(),
        base: "main".to_string(),
        head: "feature/x".to_string(),
        draft: true,
    }
}

#[test]
fn test_create_args_request_a_draft() {
    let request = request("Add widget", "## Summary\nAdded widget support");
    assert_eq!(
        create_args(&request),
        vec![
            "pr",
            "create",
            "--draft",
            "--title",
            "Add widget",
            "--body",
            "## Summary\nAdded widget support",
            "--base",
            "main",
            "--head",
            "feature/x",
        ]
    );
}

#[test]
fn test_create_args_without_draft() {
    let mut request = request("Add widget", "");
    request.draft = false;
    assert!(!create_args(&request).contains(&"--draft"));
}

#[test]
fn test_shell_metacharacters_stay_single_arguments() {
    let title = "Fix \"quotes\" $(rm -rf /) `id` && echo; done";
    let body = "```\nab12cd3 it's \"fine\"\n```\n$HOME";
    let request = request(title, body);
    let args = create_args(&request);

    let title_at = args.iter().position(|a| *a == "--title").unwrap();
    let body_at = args.iter().position(|a| *a == "--body").unwrap();
    assert_eq!(args[title_at + 1], title);
    assert_eq!(args[body_at + 1], body);
    assert_eq!(args.len(), 11);
}

#[test]
fn test_mock_records_requests() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let github = MockGitHubCli::new(calls.clone());

    let url = github.create_pr(&request("Add widget", "body")).unwrap();

    assert_eq!(url, "https://github.com/acme/widgets/pull/1");
    assert_eq!(github.get_created_prs(), vec![request("Add widget", "body")]);
    assert_eq!(*calls.lock().unwrap(), vec!["create_pr feature/x".to_string()]);
}

#[test]
fn test_mock_failure() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let github = MockGitHubCli::new(calls).failing("HTTP 422: Validation Failed");

    let result = github.create_pr(&request("Add widget", "body"));
    assert!(matches!(result, Err(OpenerError::PrCreation(ref e)) if e.contains("422")));
    assert!(github.get_created_prs().is_empty());
}
