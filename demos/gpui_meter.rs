#[cfg(feature = "gpui")]
use std::time::Duration;

#[cfg(feature = "gpui")]
use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};

#[cfg(feature = "gpui")]
use ratemeter::{MeterConfig, Skill, gpui_backend::GpuiMeterView};

#[cfg(feature = "gpui")]
const TICK: Duration = Duration::from_millis(600);

#[cfg(feature = "gpui")]
fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(480.0), px(200.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let config = MeterConfig {
                show_performance: true,
                ..MeterConfig::default()
            };
            let view = GpuiMeterView::with_config(Default::default(), config);
            let tracker = view.tracker();
            tracker.write(|tracker| {
                let _ = tracker.record(Skill::Woodcutting, 0);
                let _ = tracker.record(Skill::Firemaking, 0);
            });
            let view_handle = cx.new(|_| view);

            let view_for_task = view_handle.clone();
            window
                .spawn(cx, move |cx: &mut AsyncWindowContext| {
                    let mut cx = cx.clone();
                    async move {
                        let mut logs = 0_i64;
                        let mut fires = 0_i64;
                        let mut tick = 0_u64;
                        loop {
                            Timer::after(TICK).await;
                            tick += 1;
                            tracker.write(|tracker| {
                                tracker.advance();
                                if tick % 4 == 0 {
                                    logs += 25;
                                    let _ = tracker.record(Skill::Woodcutting, logs);
                                }
                                if tick % 7 == 0 {
                                    fires += 40;
                                    let _ = tracker.record(Skill::Firemaking, fires);
                                }
                            });
                            cx.update(|_, cx| {
                                view_for_task.update(cx, |_view, view_cx| view_cx.notify());
                            })
                            .ok();
                        }
                    }
                })
                .detach();

            view_handle
        })
        .unwrap();
    });
}

#[cfg(not(feature = "gpui"))]
fn main() {
    eprintln!("Enable the gpui feature to run this demo.");
}
