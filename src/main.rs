/// Demo entry point: replays a sizing session against an in-memory document
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use imgnode::ResizeConfig;

    let config = match std::env::args().nth(1) {
        Some(path) => match ResizeConfig::load_from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        },
        None => ResizeConfig::load_from_default_path().unwrap_or_default(),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .init();

    if let Err(e) = demo::run(config) {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use imgnode::{
        DocumentStore, ImageAttributes, ImageNodeView, MemoryStore, NaturalSize, NodeContext,
        ResizeConfig,
    };
    use imgnode_ui::{ElementTree, Event, EventHub, MouseButton, Point, Rectangle};

    const DEMO_SRC: &str = "https://cdn.example.com/uploads/landscape.png";

    pub fn run(config: ResizeConfig) -> Result<(), Box<dyn std::error::Error>> {
        let mut tree = ElementTree::new();
        let page = tree.insert_root(&["page"], Rectangle::new(0.0, 0.0, 1280.0, 900.0));
        let surface = tree
            .insert_child(
                page,
                &[config.container_marker.as_str()],
                Rectangle::new(0.0, 0.0, 1000.0, 900.0),
            )
            .ok_or("page element missing")?;
        let node = tree
            .insert_child(surface, &["image-node"], Rectangle::new(50.0, 40.0, 0.0, 0.0))
            .ok_or("surface element missing")?;
        let tree = Rc::new(RefCell::new(tree));

        let store = Rc::new(RefCell::new(MemoryStore::new(
            ImageAttributes::new(Some(DEMO_SRC.to_string())).with_id("img-1"),
        )));
        let hub = EventHub::new();

        let view = ImageNodeView::mount(
            NodeContext {
                store: Rc::clone(&store),
                hub: hub.clone(),
                tree: Rc::clone(&tree),
                element: node,
                position: 1,
            },
            config,
        )
        .on_load_failure(|failed| log::warn!("Host notified of load failure: {}", failed));

        let outcome = view.on_image_load(NaturalSize::new(400, 200));
        log::info!("First load: {:?}", outcome);
        log::info!("Visibility: {:?}", view.visibility(true));

        // Layout pass after the first size was applied
        let size = view.size();
        let width = size.width.as_pixels().unwrap_or(0.0) as f32;
        let height = size.height.as_pixels().unwrap_or(0.0) as f32;
        tree.borrow_mut()
            .set_bounds(node, Rectangle::new(50.0, 40.0, width, height));

        let press = Event::PointerDown {
            button: MouseButton::Left,
            position: Point::new(50.0 + width, 40.0 + height),
        };
        view.on_handle_pointer_down(&press);
        for x in [300.0, 275.0, 250.0] {
            hub.dispatch(&Event::PointerMove {
                position: Point::new(x, 140.0),
            });
            log::info!("Dragging: {} x {}", view.size().width, view.size().height);
        }
        hub.dispatch(&Event::PointerUp {
            button: MouseButton::Left,
            position: Point::new(250.0, 140.0),
        });

        println!("{}", serde_json::to_string_pretty(&store.borrow().attributes())?);
        println!("commits: {}", store.borrow().commits().len());
        println!("toolbar: {}", serde_json::to_string(&view.toolbar_snapshot())?);
        Ok(())
    }
}
