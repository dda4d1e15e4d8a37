use std::time::Duration;

use pdfqa_tui::{
    AppActor, ModelDescriptor, NetworkCommand, NetworkResponse, RenderState, Settings, UiEvent,
};
use tokio::sync::mpsc;

async fn next<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> T {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("message within timeout")
        .expect("channel open")
}

/// Read render snapshots until one matches
async fn render_until(
    rx: &mut mpsc::UnboundedReceiver<RenderState>,
    done: impl Fn(&RenderState) -> bool,
) -> RenderState {
    loop {
        let state = next(rx).await;
        if done(&state) {
            return state;
        }
    }
}

#[tokio::test]
async fn loads_models_at_start_and_shuts_down_on_quit() {
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel();

    let actor = AppActor::new(&Settings::default(), net_cmd_tx, render_tx);
    let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

    assert_eq!(next(&mut net_cmd_rx).await, NetworkCommand::LoadModels { id: 1 });
    let first = next(&mut render_rx).await;
    assert!(first.models_loading);

    net_resp_tx
        .send(NetworkResponse::ModelsLoaded {
            id: 1,
            models: vec![ModelDescriptor::new("llama3")],
        })
        .unwrap();
    let loaded = render_until(&mut render_rx, |s| !s.models_loading).await;
    assert_eq!(loaded.model_options, vec!["llama3".to_string()]);

    ui_tx.send(UiEvent::Quit).unwrap();
    assert_eq!(next(&mut net_cmd_rx).await, NetworkCommand::Shutdown);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("actor stops after quit")
        .unwrap();
}

#[tokio::test]
async fn lost_network_worker_frees_the_operation() {
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (_net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel();
    drop(net_cmd_rx);

    let actor = AppActor::new(&Settings::default(), net_cmd_tx, render_tx);
    tokio::spawn(actor.run(ui_rx, net_resp_rx));

    let start = next(&mut render_rx).await;
    assert!(!start.models_loading);
    assert!(start
        .last_error
        .as_deref()
        .is_some_and(|e| e.contains("network worker unavailable")));

    // The reload is attempted again instead of being dropped as a duplicate
    ui_tx.send(UiEvent::ReloadModels).unwrap();
    let reload = next(&mut render_rx).await;
    assert!(!reload.models_loading);
    assert!(reload.last_error.is_some());

    for event in [
        UiEvent::NextPanel,
        UiEvent::NextPanel,
        UiEvent::StartEditing,
        UiEvent::CharInput('q'),
        UiEvent::AskQuestion,
    ] {
        ui_tx.send(event).unwrap();
    }
    let asked = render_until(&mut render_rx, |s| s.answer.starts_with("Error:")).await;
    assert!(!asked.ask_in_flight);
    assert_eq!(asked.question, "q");
}
