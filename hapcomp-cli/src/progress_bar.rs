use std::sync::{Arc, Mutex};
use std::time::Duration;

use hapcomp::progress::{ByteNum, ProgressNotifier};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

#[derive(Debug)]
struct HapProgressBarState {
    length: u64,
    initialized: bool,
}

impl HapProgressBarState {
    fn new() -> Self {
        Self {
            length: 0,
            initialized: false,
        }
    }
}

/// Byte-level progress bar shared by all subcommands: a plain bar when the
/// input length is known up front, a spinner otherwise.
#[derive(Debug, Clone)]
pub(crate) struct HapProgressBar {
    bar: ProgressBar,
    state: Arc<Mutex<HapProgressBarState>>,
}

impl HapProgressBar {
    pub fn new() -> HapProgressBar {
        let init_bar = ProgressBar::hidden();
        init_bar.set_style(ProgressStyle::default_spinner());
        init_bar.enable_steady_tick(Duration::from_millis(50));
        init_bar.set_message("Initializing...");

        Self {
            bar: init_bar,
            state: Arc::new(Mutex::new(HapProgressBarState::new())),
        }
    }

    pub fn show(&self) {
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        self.bar.println(msg);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear()
    }

    pub fn set_total_bytes(&self, bytes: u64) {
        let mut state = self.state.lock().unwrap();
        state.length = bytes;
    }

    fn init(&self) {
        let mut state = self.state.lock().unwrap();
        if state.initialized {
            return;
        }

        if state.length == 0 {
            self.bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {bytes}/? ({bytes_per_sec}) {msg}")
                    .expect("Invalid progress bar template"),
            );
        } else {
            self.bar.set_length(state.length);
            self.bar.set_style(
                ProgressStyle::default_bar()
                    .template("{wide_bar} {bytes}/{total_bytes} [ETA {eta}]")
                    .expect("Invalid progress bar template"),
            );
        }
        self.bar.set_position(0);
        self.bar.set_message("");

        state.initialized = true;
    }
}

impl ProgressNotifier for HapProgressBar {
    fn processed_bytes(&self, bytes: ByteNum) {
        self.init();
        self.bar.inc(bytes.get() as u64);
    }
}
