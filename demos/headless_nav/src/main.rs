use glide_navigation::testing::RecordingHost;
use glide_navigation::*;
use web_time::{Duration, Instant};

struct Inbox {
    view: ViewId,
    container: ViewId,
}

impl Screen for Inbox {
    fn build(cx: &mut BuildCx<'_>) -> Self {
        let view = cx.host().create_view();
        let container = cx.host().create_view();
        cx.host().add_subview(view, container);
        Inbox { view, container }
    }
    fn view(&self) -> ViewId {
        self.view
    }
    fn container(&self) -> Option<ViewId> {
        Some(self.container)
    }
    fn on_enter_foreground(&mut self, cx: &mut LifecycleCx<'_>) {
        log::info!("{} visible", cx.id);
    }
}

struct Message {
    view: ViewId,
}

impl Screen for Message {
    fn build(cx: &mut BuildCx<'_>) -> Self {
        Message {
            view: cx.host().create_view(),
        }
    }
    fn view(&self) -> ViewId {
        self.view
    }
    fn on_enter_foreground(&mut self, cx: &mut LifecycleCx<'_>) {
        log::info!("{} visible", cx.id);
    }
    fn on_removed(&mut self, cx: &mut LifecycleCx<'_>) {
        log::info!("{} closed", cx.id);
    }
}

/// Tick at 60 fps until nothing is animating.
fn run_frames(nav: &mut Navigator<RecordingHost>, from: Instant) -> Instant {
    let frame = Duration::from_millis(16);
    let mut now = from;
    while nav.tick(now) {
        now += frame;
    }
    for event in nav.drain_events() {
        log::info!("{event:?}");
    }
    now
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut nav = Navigator::new(RecordingHost::with_width(375.0));
    let inbox = nav.mount_root::<Inbox>(ScreenRequest::new())?;

    nav.push::<Message>(inbox, ScreenRequest::new().id("1"))?;
    let now = run_frames(&mut nav, Instant::now());
    println!("{}", nav.snapshot_json(inbox)?);

    // Half-hearted swipe: springs back.
    nav.handle_edge_pan(inbox, EdgePan::began())?;
    nav.handle_edge_pan(inbox, EdgePan::changed(90.0))?;
    let response = nav.handle_edge_pan(inbox, EdgePan::ended(120.0, 200.0))?;
    log::info!("short swipe: {response:?}");
    let now = run_frames(&mut nav, now);

    // Past the middle: pops.
    nav.handle_edge_pan(inbox, EdgePan::began())?;
    for dx in [60.0, 140.0, 210.0] {
        nav.handle_edge_pan(inbox, EdgePan::changed(dx))?;
    }
    let response = nav.handle_edge_pan(inbox, EdgePan::ended(240.0, 400.0))?;
    log::info!("long swipe: {response:?}");
    run_frames(&mut nav, now);

    println!("{}", nav.snapshot_json(inbox)?);
    Ok(())
}
