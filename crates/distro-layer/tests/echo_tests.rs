//! The command echo goes through tracing and is skipped when output is hidden

mod common;

use common::{RecordingLauncher, apt_layer};
use distro_layer::{CallOptions, ECHO_TARGET, LayerConfig};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuf {
    type Writer = SharedBuf;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_echo_unless_hidden() {
    let buf = SharedBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        smol::block_on(async {
            let launcher = RecordingLauncher::new().reply("apt-get", 0, "done\n", "");
            let layer = apt_layer(launcher, LayerConfig::default());

            layer.install("curl").await.unwrap();
            let echoed = buf.contents();
            assert!(echoed.contains(ECHO_TARGET), "no echo in: {}", echoed);
            assert!(echoed.contains("apt-get install -y curl"));

            buf.clear();
            let outcome = layer
                .install(CallOptions::with_args(["curl"]).hide())
                .await
                .unwrap();
            let result = outcome.executed().unwrap();
            assert_eq!(result.stdout(), Some("done\n"));
            assert_eq!(result.stderr(), Some(""));
            assert!(!buf.contents().contains(ECHO_TARGET));
        })
    });
}

#[test]
fn test_stderr_surfaced_even_when_hidden() {
    let buf = SharedBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        smol::block_on(async {
            let launcher = RecordingLauncher::new().reply(
                "apt-get",
                0,
                "",
                "W: Some index files failed to download\n",
            );
            let layer = apt_layer(launcher, LayerConfig::default());

            layer.update(CallOptions::new().hide()).await.unwrap();

            let logged = buf.contents();
            assert!(!logged.contains(ECHO_TARGET));
            assert!(logged.contains("W: Some index files failed to download"));
            assert!(logged.contains("WARN"));
        })
    });
}

#[test]
fn test_password_never_reaches_debug_logs() -> anyhow::Result<()> {
    let buf = SharedBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let hash = tracing::subscriber::with_default(subscriber, || {
        smol::block_on(async {
            let launcher = RecordingLauncher::new().reply("openssl", 0, "$6$salt$digest\n", "");
            let layer = apt_layer(launcher, LayerConfig::default());
            layer.encrypt_password("S3cretPlain").await
        })
    })?;

    let logged = buf.contents();
    assert_eq!(hash, "$6$salt$digest");
    assert!(logged.contains("openssl"), "no debug event in: {}", logged);
    assert!(!logged.contains("S3cretPlain"), "plaintext logged: {}", logged);
    Ok(())
}
