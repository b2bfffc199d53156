use crate::composition::{
    dim_style, glow_style, mask_style, root_style, ButtonLayout, MountKey, DEFAULT_BG_CLASS,
};
use crate::config::{AppConfig, MosaicConfig};
use crate::frame_loop::{FrameLoop, FrameScheduler};
use crate::icons::{resolve_icon, ICON_VIEW_BOX};
use crate::mosaic::{Mosaic, Surface};
use crate::pointer::{
    on_pointer_enter, on_pointer_leave, on_pointer_move, Bounds, GlowState, PointerCell,
};
use crate::telemetry::{log_event, set_log_level, LogLevel};
use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    window, CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement, KeyboardEvent,
    MouseEvent,
};
use yew::prelude::*;

const CONFIG_ATTRIBUTE: &str = "data-mosaic-config";
const DEFAULT_ICON_SIZE: u32 = 32;

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn seeded_rng() -> SmallRng {
    let seed = js_sys::Math::random() * 9_007_199_254_740_992.0;
    SmallRng::seed_from_u64(seed as u64 ^ js_sys::Date::now() as u64)
}

struct AnimationFrameScheduler;

impl FrameScheduler for AnimationFrameScheduler {
    type Frame = AnimationFrame;

    fn request(&self, callback: Box<dyn FnOnce(f64)>) -> AnimationFrame {
        request_animation_frame(callback)
    }
}

struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn attach(canvas_ref: &NodeRef) -> Result<Self, &'static str> {
        let canvas = canvas_ref
            .cast::<HtmlCanvasElement>()
            .ok_or("canvas unavailable")?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or("2d context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "2d context unavailable")?;

        Ok(Self { canvas, context })
    }

    fn fit_to(&mut self, container: &HtmlElement) {
        let width = u32::try_from(container.offset_width()).unwrap_or(0);
        let height = u32::try_from(container.offset_height()).unwrap_or(0);
        self.resize(width, height);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.context
            .clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn fill_square(&mut self, x: f64, y: f64, side: f64, alpha: f64) {
        self.context
            .set_fill_style_str(&format!("rgba(255, 255, 255, {alpha:.4})"));
        self.context.fill_rect(x, y, side, side);
    }
}

/// Everything the mosaic owns while the button is mounted. Dropping it
/// cancels the pending frame and detaches the resize listener.
struct MountedMosaic {
    mosaic: Rc<RefCell<Mosaic<SmallRng>>>,
    _frame_loop: FrameLoop<AnimationFrameScheduler>,
    _resize_listener: EventListener,
}

impl Drop for MountedMosaic {
    fn drop(&mut self) {
        let mut mosaic = self.mosaic.borrow_mut();
        log_event(
            LogLevel::Debug,
            "mosaic.unmounted",
            json!({ "liveSquares": mosaic.len() }),
        );
        mosaic.clear();
    }
}

fn mount_mosaic(
    container_ref: &NodeRef,
    canvas_ref: &NodeRef,
    pointer: Rc<RefCell<PointerCell>>,
    config: MosaicConfig,
) -> Result<MountedMosaic, &'static str> {
    let win = window().ok_or("window unavailable")?;
    let container = container_ref
        .cast::<HtmlElement>()
        .ok_or("container unavailable")?;

    let mut surface = CanvasSurface::attach(canvas_ref)?;
    surface.fit_to(&container);
    let (width, height) = surface.size();
    let surface = Rc::new(RefCell::new(surface));

    let reduced_motion = prefers_reduced_motion();
    let config = MosaicConfig {
        spawn_probability: config.effective_spawn_probability(reduced_motion),
        ..config
    };
    let mosaic = Rc::new(RefCell::new(Mosaic::new(config, seeded_rng())));

    let resize_listener = {
        let surface = surface.clone();
        EventListener::new(&win, "resize", move |_| {
            let mut surface = surface.borrow_mut();
            surface.fit_to(&container);
            let (width, height) = surface.size();
            log_event(
                LogLevel::Debug,
                "mosaic.resized",
                json!({ "width": width, "height": height }),
            );
        })
    };

    let frame_loop = {
        let mosaic = mosaic.clone();
        FrameLoop::start(AnimationFrameScheduler, move |_timestamp| {
            let pointer = *pointer.borrow();
            mosaic.borrow_mut().tick(&pointer, &mut *surface.borrow_mut());
        })
    };

    log_event(
        LogLevel::Info,
        "mosaic.mounted",
        json!({
            "width": width,
            "height": height,
            "cellSize": config.cell_size,
            "reducedMotion": reduced_motion,
        }),
    );

    Ok(MountedMosaic {
        mosaic,
        _frame_loop: frame_loop,
        _resize_listener: resize_listener,
    })
}

#[derive(Properties, PartialEq)]
pub struct ServiceIconProps {
    pub name: AttrValue,
    #[prop_or(DEFAULT_ICON_SIZE)]
    pub size: u32,
}

#[function_component(ServiceIcon)]
pub fn service_icon(props: &ServiceIconProps) -> Html {
    let Some(icon) = resolve_icon(&props.name, props.size) else {
        return Html::default();
    };
    let size = icon.size.to_string();

    html! {
        <svg
            class="mosaic-icon"
            width={size.clone()}
            height={size}
            viewBox={ICON_VIEW_BOX}
            fill="none"
            stroke="currentColor"
            stroke-width="1.5"
            stroke-linecap="round"
            stroke-linejoin="round"
            data-service={icon.service.as_str()}
        >
            { for icon.paths.iter().map(|d| html! { <path d={*d} /> }) }
        </svg>
    }
}

#[derive(Properties, PartialEq)]
pub struct MosaicButtonProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub subtitle: Option<AttrValue>,
    #[prop_or_default]
    pub on_click: Option<Callback<()>>,
    #[prop_or_default]
    pub href: Option<AttrValue>,
    #[prop_or_default]
    pub icon_name: Option<AttrValue>,
    #[prop_or(AttrValue::Static(DEFAULT_BG_CLASS))]
    pub bg_color_class: AttrValue,
    #[prop_or_default]
    pub layout: ButtonLayout,
    #[prop_or_default]
    pub config: MosaicConfig,
}

#[function_component(MosaicButton)]
pub fn mosaic_button(props: &MosaicButtonProps) -> Html {
    let container_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let pointer = use_mut_ref(PointerCell::default);
    let glow = use_state(GlowState::default);

    {
        let container_ref = container_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let pointer = pointer.clone();
        let key = MountKey::new(props.config, props.href.as_deref());
        use_effect_with(key, move |key| {
            let mounted = match mount_mosaic(&container_ref, &canvas_ref, pointer, key.config) {
                Ok(mounted) => Some(mounted),
                Err(reason) => {
                    log_event(
                        LogLevel::Debug,
                        "mosaic.setup_aborted",
                        json!({ "reason": reason }),
                    );
                    None
                }
            };
            move || drop(mounted)
        });
    }

    let onmousemove = {
        let container_ref = container_ref.clone();
        let pointer = pointer.clone();
        let glow = glow.clone();
        Callback::from(move |event: MouseEvent| {
            let bounds = container_ref.cast::<HtmlElement>().map(|container| {
                let rect = container.get_bounding_client_rect();
                Bounds {
                    left: rect.left(),
                    top: rect.top(),
                }
            });
            let next = on_pointer_move(
                bounds,
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                &mut pointer.borrow_mut(),
                *glow,
            );
            if let Some(next) = next {
                glow.set(next);
            }
        })
    };

    let onmouseenter = {
        let pointer = pointer.clone();
        let glow = glow.clone();
        Callback::from(move |_: MouseEvent| {
            glow.set(on_pointer_enter(&mut pointer.borrow_mut(), *glow));
        })
    };

    let onmouseleave = {
        let pointer = pointer.clone();
        let glow = glow.clone();
        Callback::from(move |_: MouseEvent| {
            glow.set(on_pointer_leave(&mut pointer.borrow_mut(), *glow));
        })
    };

    let layout = props.layout;
    let icon = props.icon_name.clone().map(|name| {
        html! { <ServiceIcon name={name} size={DEFAULT_ICON_SIZE} /> }
    });
    let subtitle = props
        .subtitle
        .clone()
        .map(|subtitle| html! { <p class="mosaic-subtitle">{subtitle}</p> });

    let content = match layout {
        ButtonLayout::Centered => html! {
            <div class={classes!("mosaic-content", layout.class())}>
                {icon}
                <h3 class="mosaic-title">{props.title.clone()}</h3>
                {subtitle}
            </div>
        },
        ButtonLayout::Split => html! {
            <div class={classes!("mosaic-content", layout.class())}>
                <div class="mosaic-content-top">
                    {icon}
                    <h3 class="mosaic-title">{props.title.clone()}</h3>
                    {subtitle}
                </div>
                if layout.has_go_to() {
                    <span class="mosaic-go-to">
                        {"Go to"}
                        <span aria-hidden="true">{" →"}</span>
                    </span>
                }
            </div>
        },
    };

    let layers = html! {
        <>
            <div class="mosaic-grid" aria-hidden="true" />
            <div class="mosaic-glow" style={glow_style(&glow)} aria-hidden="true" />
            <div class="mosaic-grid mosaic-grid-highlight" style={mask_style(&glow)} aria-hidden="true" />
            <canvas ref={canvas_ref} class="mosaic-canvas" aria-hidden="true" />
            if layout.has_dim_overlay() {
                <div class="mosaic-dim" style={dim_style(&glow)} aria-hidden="true" />
            }
            {content}
        </>
    };

    let class = classes!("mosaic-button", props.bg_color_class.to_string());

    if let Some(href) = props.href.clone() {
        return html! {
            <a
                ref={container_ref}
                class={class}
                style={root_style()}
                href={href}
                target="_blank"
                rel="noopener noreferrer"
                onmousemove={onmousemove}
                onmouseenter={onmouseenter}
                onmouseleave={onmouseleave}
            >
                {layers}
            </a>
        };
    }

    let onclick = {
        let on_click = props.on_click.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(on_click) = on_click.as_ref() {
                on_click.emit(());
            }
        })
    };

    let onkeydown = {
        let on_click = props.on_click.clone();
        Callback::from(move |event: KeyboardEvent| {
            if !matches!(event.key().as_str(), "Enter" | " ") {
                return;
            }
            event.prevent_default();
            if let Some(on_click) = on_click.as_ref() {
                on_click.emit(());
            }
        })
    };

    html! {
        <div
            ref={container_ref}
            class={class}
            style={root_style()}
            role="button"
            tabindex="0"
            onclick={onclick}
            onkeydown={onkeydown}
            onmousemove={onmousemove}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
        >
            {layers}
        </div>
    }
}

fn load_config(root: &Element) -> AppConfig {
    let Some(raw) = root.get_attribute(CONFIG_ATTRIBUTE) else {
        return AppConfig::default();
    };

    match AppConfig::from_json(&raw) {
        Ok(config) => config,
        Err(error) => {
            log_event(
                LogLevel::Warn,
                "config.invalid",
                json!({ "attribute": CONFIG_ATTRIBUTE, "error": error.to_string() }),
            );
            AppConfig::default()
        }
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: MosaicConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let contact_clicks = use_state(|| 0_u32);

    let on_contact = {
        let contact_clicks = contact_clicks.clone();
        Callback::from(move |()| contact_clicks.set(*contact_clicks + 1))
    };

    html! {
        <main class="mosaic-demo">
            <MosaicButton
                title="GitHub"
                subtitle="Code and experiments"
                href="https://github.com"
                icon_name="github"
                config={props.config}
            />
            <MosaicButton
                title="Get in touch"
                subtitle="Questions, ideas, collaborations"
                icon_name="email"
                layout={ButtonLayout::Split}
                on_click={on_contact}
                config={props.config}
            />
            <p class="mosaic-demo-status muted">
                {format!("Contact opened {} times", *contact_clicks)}
            </p>
        </main>
    }
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .expect("missing #app mount point");

    let config = load_config(&root);
    set_log_level(config.log_level);
    log_event(
        LogLevel::Info,
        "app.started",
        json!({ "logLevel": config.log_level.as_str() }),
    );

    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            config: config.mosaic,
        },
    )
    .render();
}
