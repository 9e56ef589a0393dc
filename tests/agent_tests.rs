//! Tool loop behaviour against a scripted provider.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{agent_config, mock_agent, MockProvider, RecordingBrowser};
use physics_mentor::agent::{Agent, StopReason, GIVE_UP_ANSWER, PHYSICS_MENTOR_INSTRUCTIONS};
use physics_mentor::error::MentorError;
use physics_mentor::normalize::normalize;
use physics_mentor::tools::{study_registry, StudyEnvironment, ToolRegistry};
use physics_mentor::types::Role;

fn study_env(dir: &tempfile::TempDir) -> (Arc<StudyEnvironment>, Arc<RecordingBrowser>) {
    let browser = Arc::new(RecordingBrowser::default());
    let env = Arc::new(StudyEnvironment::new(dir.path(), browser.clone()));
    (env, browser)
}

#[tokio::test]
async fn formula_sheet_request_writes_file_and_answer_names_it() {
    let dir = tempfile::tempdir().unwrap();
    let (env, browser) = study_env(&dir);
    let provider = MockProvider::new();
    provider.queue_tool_call("call_1", "create_formula_sheet", json!({"exam_type": "NEET"}));
    provider.queue_echo_tool_result("Here you go! ");

    let agent = mock_agent(provider.clone(), study_registry(env));
    let result = agent.run("Create a formula sheet for NEET").await.unwrap();

    let sheet = std::fs::read_to_string(dir.path().join("Physics_Formulas_NEET.txt")).unwrap();
    assert!(sheet.contains("NEET"));

    let answer = normalize(&result);
    assert!(answer.contains("Physics_Formulas_NEET.txt"), "{answer}");
    assert!(answer.starts_with("Here you go! ✅ NEET physics formula sheet created"));

    assert_eq!(result.stop, StopReason::Completed);
    assert_eq!(result.round_trips, 2);
    assert_eq!(result.tool_calls().count(), 1);
    assert_eq!(result.usage.input_tokens, 10);
    assert!(browser.opened().is_empty());

    // The tool result goes back with the originating call id.
    let second = &provider.requests()[1];
    let tool_msg = second.messages.last().unwrap();
    assert_eq!(tool_msg.role, Role::Tool);
    assert_eq!(tool_msg.tool_result_part().unwrap().tool_call_id, "call_1");
}

#[tokio::test]
async fn off_topic_question_is_declined_without_tools() {
    let dir = tempfile::tempdir().unwrap();
    let (env, browser) = study_env(&dir);
    let provider = MockProvider::new();
    provider.queue_response(
        "I'm your Physics Mentor, so I can only help with physics topics. \
         Try asking me about motion, energy or waves!",
    );

    let agent = mock_agent(provider.clone(), study_registry(env));
    let result = agent.run("Write me a poem").await.unwrap();

    let answer = normalize(&result);
    assert!(answer.contains("only help with physics"));
    assert_eq!(result.tool_calls().count(), 0);
    assert_eq!(result.round_trips, 1);
    assert!(browser.opened().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    let request = &provider.requests()[0];
    assert_eq!(request.tools.as_ref().map(Vec::len), Some(6));
}

#[tokio::test]
async fn each_run_sends_only_system_prompt_and_current_question() {
    let provider = MockProvider::new();
    provider.queue_response("Inertia resists changes in motion.");
    provider.queue_response("Momentum is mass times velocity.");

    let agent = mock_agent(provider.clone(), ToolRegistry::new());
    agent.run("What is inertia?").await.unwrap();
    agent.run("And momentum?").await.unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    let second = &requests[1].messages;
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].role, Role::System);
    assert_eq!(second[0].text(), PHYSICS_MENTOR_INSTRUCTIONS);
    assert_eq!(second[1].role, Role::User);
    assert_eq!(second[1].text(), "And momentum?");
    assert!(requests[1].tools.is_none());
}

#[tokio::test]
async fn endless_tool_calls_stop_at_round_trip_limit() {
    let dir = tempfile::tempdir().unwrap();
    let (env, browser) = study_env(&dir);
    let provider = MockProvider::new();
    for i in 0..5 {
        provider.queue_tool_call(
            &format!("call_{i}"),
            "search_physics_videos",
            json!({"topic": "optics"}),
        );
    }

    let agent = Agent::with_provider(
        Arc::new(agent_config(study_registry(env), 3)),
        provider.clone(),
    );
    let result = agent.run("Find optics videos").await.unwrap();

    assert_eq!(result.stop, StopReason::RoundTripLimit);
    assert_eq!(result.final_output, GIVE_UP_ANSWER);
    assert_eq!(result.round_trips, 3);
    assert_eq!(provider.requests().len(), 3);
    assert_eq!(browser.opened().len(), 3);
}

#[tokio::test]
async fn unknown_tool_and_bad_arguments_are_reported_to_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let (env, _browser) = study_env(&dir);
    let provider = MockProvider::new();
    provider.queue_tool_call("call_a", "launch_rocket", json!({}));
    provider.queue_tool_call("call_b", "create_physics_notes", json!({"topic": "Optics"}));
    provider.queue_response("Sorry, something went wrong with my tools.");

    let agent = mock_agent(provider.clone(), study_registry(env));
    let result = agent.run("Save notes on optics").await.unwrap();

    let outputs: Vec<_> = result
        .tool_outputs()
        .map(|o| o.status_text.clone())
        .collect();
    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].starts_with("❌ Unknown tool 'launch_rocket'"));
    assert!(outputs[0].contains("create_formula_sheet"));
    assert!(outputs[1].starts_with("❌ Error running tool 'create_physics_notes'"));
    assert!(outputs[1].contains("content"));
    assert_eq!(result.stop, StopReason::Completed);
}

#[tokio::test]
async fn provider_failure_propagates() {
    let provider = MockProvider::new();
    provider.queue_error(MentorError::Authentication("bad key".into()));

    let agent = mock_agent(provider, ToolRegistry::new());
    let err = agent.run("What is g?").await.unwrap_err();
    assert!(matches!(err, MentorError::Authentication(_)));
}
