//! Recorder proxy integration tests against an in-process host

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use recorder_bridge::application::ports::{DispatchError, EventSink, HostChannel};
use recorder_bridge::application::{
    methods, DetachedRecorder, RecorderError, RecorderProxy, STATE_CHANGED_EVENT,
};
use recorder_bridge::domain::recording::{
    AudioEncoder, InputDevice, RecorderConfiguration, RecorderState, StateChangeEvent,
};

/// Scripted host: fixed reply per call name, optional delay, captured calls
#[derive(Default)]
struct ScriptedHost {
    replies: Mutex<HashMap<String, Result<Value, DispatchError>>>,
    delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<(String, Value, Duration)>>,
    sinks: Mutex<Vec<Arc<dyn EventSink>>>,
}

impl ScriptedHost {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn reply(&self, method: &str, value: Value) {
        self.replies.lock().insert(method.to_string(), Ok(value));
    }

    fn fail(&self, method: &str, message: &str) {
        self.replies.lock().insert(
            method.to_string(),
            Err(DispatchError::Host {
                method: method.to_string(),
                message: message.to_string(),
            }),
        );
    }

    fn delay_by(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    fn calls(&self) -> Vec<(String, Value, Duration)> {
        self.calls.lock().clone()
    }

    fn call_names(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(m, _, _)| m.clone()).collect()
    }

    /// Push an event as the host would
    fn emit(&self, name: &str, payload: Value) {
        let sinks = self.sinks.lock().clone();
        for sink in sinks {
            sink.on_event(name, &payload).unwrap();
        }
    }
}

#[async_trait]
impl HostChannel for ScriptedHost {
    async fn send(
        &self,
        method: &str,
        args: Value,
        timeout: Duration,
    ) -> Result<Value, DispatchError> {
        self.calls.lock().push((method.to_string(), args, timeout));
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .get(method)
            .cloned()
            .unwrap_or(Ok(Value::Null))
    }

    fn add_event_sink(&self, sink: Arc<dyn EventSink>) {
        self.sinks.lock().push(sink);
    }
}

fn collect_events(proxy: &RecorderProxy<ScriptedHost>) -> Arc<Mutex<Vec<StateChangeEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    proxy.on_state_change(move |event| sink.lock().push(event));
    seen
}

#[tokio::test]
async fn start_without_path_off_web_sends_nothing() {
    let host = ScriptedHost::new();
    let proxy = RecorderProxy::new(host.clone());

    let err = proxy.start_recording(None, None, None).await.unwrap_err();
    match err {
        RecorderError::InvalidArgument(e) => assert_eq!(e.name, "output_path"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn start_on_web_sends_null_path() {
    let host = ScriptedHost::new();
    host.reply(methods::START_RECORDING, json!(true));
    let proxy = RecorderProxy::new(host.clone()).with_web(true);

    assert!(proxy.start_recording(None, None, None).await.unwrap());

    let calls = host.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "start_recording");
    assert_eq!(calls[0].1["output_path"], Value::Null);
}

#[tokio::test]
async fn start_sends_path_and_default_configuration() {
    let host = ScriptedHost::new();
    host.reply(methods::START_RECORDING, json!(true));
    let proxy = RecorderProxy::new(host.clone());

    assert!(proxy
        .start_recording(Some("take1.wav"), None, None)
        .await
        .unwrap());

    let (_, args, _) = &host.calls()[0];
    assert_eq!(args["output_path"], "take1.wav");
    assert_eq!(args["configuration"]["encoder"], "wav");
    assert_eq!(args["configuration"]["channels"], 2);
    assert_eq!(args["configuration"]["sample_rate"], 44100);
    assert_eq!(args["configuration"]["bit_rate"], 128000);
}

#[tokio::test]
async fn start_override_replaces_default() {
    let host = ScriptedHost::new();
    host.reply(methods::START_RECORDING, json!(true));
    let default = RecorderConfiguration::builder()
        .encoder(AudioEncoder::Flac)
        .build()
        .unwrap();
    let proxy = RecorderProxy::new(host.clone()).with_configuration(default);

    let custom = RecorderConfiguration::builder()
        .encoder(AudioEncoder::Opus)
        .channels(1)
        .device(Some(InputDevice::new("d2", "USB Mic")))
        .build()
        .unwrap();
    proxy
        .start_recording(Some("out.opus"), Some(&custom), None)
        .await
        .unwrap();
    proxy
        .start_recording(Some("out.flac"), None, None)
        .await
        .unwrap();

    let calls = host.calls();
    assert_eq!(calls[0].1["configuration"]["encoder"], "opus");
    assert_eq!(calls[0].1["configuration"]["channels"], 1);
    assert_eq!(calls[0].1["configuration"]["device"]["id"], "d2");
    // Default untouched by the override
    assert_eq!(calls[1].1["configuration"]["encoder"], "flac");
}

#[tokio::test]
async fn host_declining_start_returns_false() {
    let host = ScriptedHost::new();
    host.reply(methods::START_RECORDING, json!(false));
    let proxy = RecorderProxy::new(host);

    assert!(!proxy.start_recording(Some("x.wav"), None, None).await.unwrap());
}

#[tokio::test]
async fn stop_returns_path_or_none() {
    let host = ScriptedHost::new();
    let proxy = RecorderProxy::new(host.clone());

    host.reply(methods::STOP_RECORDING, json!("/tmp/take1.wav"));
    assert_eq!(
        proxy.stop_recording(None).await.unwrap(),
        Some("/tmp/take1.wav".to_string())
    );

    host.reply(methods::STOP_RECORDING, Value::Null);
    assert_eq!(proxy.stop_recording(None).await.unwrap(), None);
}

#[tokio::test]
async fn control_calls_ignore_result() {
    let host = ScriptedHost::new();
    host.reply(methods::PAUSE_RECORDING, json!({ "ignored": true }));
    let proxy = RecorderProxy::new(host.clone());

    proxy.cancel_recording(None).await.unwrap();
    proxy.pause_recording(None).await.unwrap();
    proxy.resume_recording(None).await.unwrap();

    assert_eq!(
        host.call_names(),
        vec!["cancel_recording", "pause_recording", "resume_recording"]
    );
    for (_, args, _) in host.calls() {
        assert_eq!(args, json!({}));
    }
}

#[tokio::test]
async fn status_queries_decode_booleans() {
    let host = ScriptedHost::new();
    host.reply(methods::IS_RECORDING, json!(true));
    host.reply(methods::IS_PAUSED, json!(false));
    let proxy = RecorderProxy::new(host);

    assert!(proxy.is_recording(None).await.unwrap());
    assert!(!proxy.is_paused(None).await.unwrap());
}

#[tokio::test]
async fn encoder_support_sends_wire_name_for_every_encoder() {
    let host = ScriptedHost::new();
    host.reply(methods::IS_SUPPORTED_ENCODER, json!(true));
    let proxy = RecorderProxy::new(host.clone());

    for encoder in AudioEncoder::ALL {
        assert!(proxy.is_supported_encoder(*encoder, None).await.unwrap());
    }

    let sent: Vec<Value> = host
        .calls()
        .into_iter()
        .map(|(_, args, _)| args["encoder"].clone())
        .collect();
    let expected: Vec<Value> = AudioEncoder::ALL
        .iter()
        .map(|e| json!(e.as_str()))
        .collect();
    assert_eq!(sent, expected);
    assert!(sent.contains(&json!("pcm16bits")));
    assert!(sent.contains(&json!("aacLc")));
}

#[tokio::test]
async fn devices_keep_host_order() {
    let host = ScriptedHost::new();
    let reply: Value =
        serde_json::from_str(r#"{"z-mic": "Zed", "a-mic": "Alpha", "m-mic": "Middle"}"#).unwrap();
    host.reply(methods::GET_INPUT_DEVICES, reply);
    let proxy = RecorderProxy::new(host);

    let devices = proxy.get_input_devices(None).await.unwrap();
    assert_eq!(
        devices,
        vec![
            InputDevice::new("z-mic", "Zed"),
            InputDevice::new("a-mic", "Alpha"),
            InputDevice::new("m-mic", "Middle"),
        ]
    );
}

#[tokio::test]
async fn empty_device_mapping_is_empty_list() {
    let host = ScriptedHost::new();
    host.reply(methods::GET_INPUT_DEVICES, json!({}));
    let proxy = RecorderProxy::new(host);

    assert!(proxy.get_input_devices(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_device_mapping_is_decode_error() {
    let host = ScriptedHost::new();
    host.reply(methods::GET_INPUT_DEVICES, json!({ "d1": 3 }));
    let proxy = RecorderProxy::new(host);

    let err = proxy.get_input_devices(None).await.unwrap_err();
    assert!(matches!(err, RecorderError::Decode { .. }));
}

#[tokio::test]
async fn permission_failure_is_permission_check_error() {
    let host = ScriptedHost::new();
    host.fail(methods::HAS_PERMISSION, "permission service unavailable");
    let proxy = RecorderProxy::new(host);

    let err = proxy.has_permission(None).await.unwrap_err();
    match err {
        RecorderError::PermissionCheck(message) => {
            assert!(message.contains("unavailable"))
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn permission_granted() {
    let host = ScriptedHost::new();
    host.reply(methods::HAS_PERMISSION, json!(true));
    let proxy = RecorderProxy::new(host);

    assert!(proxy.has_permission(None).await.unwrap());
}

#[tokio::test]
async fn slow_host_times_out_within_bound() {
    let host = ScriptedHost::new();
    host.reply(methods::IS_RECORDING, json!(true));
    host.delay_by(Duration::from_secs(5));
    let proxy = RecorderProxy::new(host);

    let started = Instant::now();
    let err = proxy
        .is_recording(Some(Duration::from_millis(100)))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn every_command_times_out_once() {
    let host = ScriptedHost::new();
    host.delay_by(Duration::from_secs(5));
    let proxy = RecorderProxy::new(host.clone());
    let t = Some(Duration::from_millis(30));

    let results: Vec<RecorderError> = vec![
        proxy
            .start_recording(Some("a.wav"), None, t)
            .await
            .unwrap_err(),
        proxy.is_recording(t).await.unwrap_err(),
        proxy.stop_recording(t).await.unwrap_err(),
        proxy.cancel_recording(t).await.unwrap_err(),
        proxy.pause_recording(t).await.unwrap_err(),
        proxy.resume_recording(t).await.unwrap_err(),
        proxy.is_paused(t).await.unwrap_err(),
        proxy
            .is_supported_encoder(AudioEncoder::Opus, t)
            .await
            .unwrap_err(),
        proxy.get_input_devices(t).await.unwrap_err(),
        proxy.has_permission(t).await.unwrap_err(),
    ];

    assert!(results.iter().all(RecorderError::is_timeout));
    // One dispatch per command, no retries
    assert_eq!(host.calls().len(), results.len());
}

#[tokio::test]
async fn default_timeout_is_forwarded() {
    let host = ScriptedHost::new();
    let proxy =
        RecorderProxy::new(host.clone()).with_default_timeout(Duration::from_millis(2500));

    proxy.cancel_recording(None).await.unwrap();
    proxy.cancel_recording(Some(Duration::from_secs(1))).await.unwrap();

    let timeouts: Vec<Duration> = host.calls().into_iter().map(|(_, _, t)| t).collect();
    assert_eq!(
        timeouts,
        vec![Duration::from_millis(2500), Duration::from_secs(1)]
    );
}

#[tokio::test]
async fn default_timeout_is_ten_seconds() {
    let proxy = RecorderProxy::new(ScriptedHost::new());
    assert_eq!(proxy.default_timeout(), Duration::from_secs(10));
}

#[tokio::test]
async fn state_events_reach_callback_in_order() {
    let host = ScriptedHost::new();
    let proxy = RecorderProxy::new(host.clone());
    let seen = collect_events(&proxy);

    for state in ["recording", "paused", "recording", "stopped"] {
        host.emit(STATE_CHANGED_EVENT, json!(state));
    }

    let seen = seen.lock();
    let states: Vec<RecorderState> = seen.iter().map(|e| e.state).collect();
    assert_eq!(
        states,
        vec![
            RecorderState::Recording,
            RecorderState::Paused,
            RecorderState::Recording,
            RecorderState::Stopped,
        ]
    );
    assert!(seen.iter().all(|e| e.control_id == proxy.control_id()));
    assert_eq!(seen[1].data, "paused");
    assert_eq!(proxy.last_state(), Some(RecorderState::Stopped));
}

#[tokio::test]
async fn events_without_callback_are_discarded() {
    let host = ScriptedHost::new();
    let proxy = RecorderProxy::new(host.clone());

    host.emit(STATE_CHANGED_EVENT, json!("recording"));
    assert_eq!(proxy.last_state(), Some(RecorderState::Recording));

    // Registering later does not replay earlier events
    let seen = collect_events(&proxy);
    assert!(seen.lock().is_empty());

    host.emit(STATE_CHANGED_EVENT, json!("stopped"));
    assert_eq!(seen.lock().len(), 1);
}

#[tokio::test]
async fn replacing_callback_routes_to_newest() {
    let host = ScriptedHost::new();
    let proxy = RecorderProxy::new(host.clone());
    let first = collect_events(&proxy);
    host.emit(STATE_CHANGED_EVENT, json!("recording"));

    let second = collect_events(&proxy);
    host.emit(STATE_CHANGED_EVENT, json!("paused"));

    proxy.clear_state_change();
    host.emit(STATE_CHANGED_EVENT, json!("stopped"));

    assert_eq!(first.lock().len(), 1);
    assert_eq!(second.lock().len(), 1);
    assert_eq!(second.lock()[0].state, RecorderState::Paused);
}

#[tokio::test]
async fn proxies_get_distinct_control_ids() {
    let a = RecorderProxy::new(ScriptedHost::new());
    let b = RecorderProxy::new(ScriptedHost::new());
    assert_ne!(a.control_id(), b.control_id());
}

#[tokio::test]
async fn detached_commands_complete_in_background() {
    let host = ScriptedHost::new();
    let proxy = Arc::new(RecorderProxy::new(host.clone()));
    let detached = DetachedRecorder::new(Arc::clone(&proxy));

    detached.pause_recording(None).await.unwrap().unwrap();
    detached.resume_recording(None).await.unwrap().unwrap();
    detached.cancel_recording(None).await.unwrap().unwrap();

    assert_eq!(
        host.call_names(),
        vec!["pause_recording", "resume_recording", "cancel_recording"]
    );
}
