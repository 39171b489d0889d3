//! Subsetter: clip a feature file to a bounding box, a track-derived
//! boundary or a file of bounding geometries.

use std::rc::Rc;

use ecodash_ui::prelude::*;

use crate::config::AppConfig;
use crate::constants::DEFAULT_SUBSET_FILENAME;
use crate::error::EcoError;
use crate::services::EcoServices;
use crate::subset::{SubsetRequest, SubsetSelection};
use crate::tracks::BoundaryShape;

pub const TITLE: &str = "Subsetter";

/// Plot slot placeholder before a subset exists.
pub const PLOT_PLACEHOLDER: &str = "## Create a subset!";

/// Plot slot text when a subset was written but not plotted.
pub const SAVED_MESSAGE: &str = " ## Subset saved to output directory";

pub const SUBSET_ERROR: &str = "Error creating subset. Make sure all necessary inputs are provided.";

/// Display regions of the Subsetter, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetterSlot {
    Plot,
    InputFile,
    OptionPicker,
    OptionWidgets,
    SharedWidgets,
}

/// Which boundary source is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetOption {
    BoundingBox,
    TrackPoints,
    BoundingGeometry,
}

impl ChoiceKey for SubsetOption {
    fn key(&self) -> &'static str {
        match self {
            SubsetOption::BoundingBox => "bbox",
            SubsetOption::TrackPoints => "track_points",
            SubsetOption::BoundingGeometry => "bounding_geom",
        }
    }
}

/// Widget groups shown below the option picker.
struct OptionGroups {
    bbox: WidgetGroup,
    track_points: WidgetGroup,
    bounding_geom: WidgetGroup,
}

/// Subsetter state.
pub struct Subsetter {
    services: Rc<dyn EcoServices>,

    pub input_file: FileSelector,

    pub buffer: NumberInput,
    pub clip: Checkbox,
    pub output_file: TextInput,

    pub option_picker: Choice<SubsetOption>,

    pub bbox_latmin: NumberInput,
    pub bbox_latmax: NumberInput,
    pub bbox_lonmin: NumberInput,
    pub bbox_lonmax: NumberInput,

    pub tracks_file: FileSelector,
    pub boundary_type_tracks: Choice<BoundaryShape>,

    pub bounding_geom_file: FileSelector,
    pub boundary_type_geom: Choice<BoundaryShape>,

    pub show_plot: Checkbox,
    pub create_subset_button: Button,

    groups: OptionGroups,
    shared: WidgetGroup,
}

fn latitude(name: FieldName, label: &str) -> NumberInput {
    NumberInput::new(name, label, -90.0, 90.0).step(0.01).with_value(0.0)
}

fn longitude(name: FieldName, label: &str) -> NumberInput {
    NumberInput::new(name, label, -180.0, 180.0).step(0.01).with_value(0.0)
}

impl Subsetter {
    pub fn new(services: Rc<dyn EcoServices>, config: &AppConfig) -> Self {
        let output = config.output_path(DEFAULT_SUBSET_FILENAME);

        Self {
            services,
            input_file: FileSelector::new("input_file", "Input file").expanded(true),
            buffer: NumberInput::slider("buffer", "Buffer size", 0.0, 1.0)
                .step(0.01)
                .with_value(0.0),
            clip: Checkbox::new("clip", "Clip features", true),
            output_file: TextInput::new("output_file", "Output file")
                .placeholder("Choose an output file...".to_string())
                .with_value(output.display().to_string()),
            option_picker: Choice::new(
                "option_picker",
                "Subsetting options",
                vec![
                    ("Bounding Box", SubsetOption::BoundingBox),
                    ("Track Points", SubsetOption::TrackPoints),
                    ("Bounding Geometry", SubsetOption::BoundingGeometry),
                ],
            )
            .style(ChoiceStyle::RadioButtons),
            bbox_latmin: latitude("bbox_latmin", "Lat min"),
            bbox_latmax: latitude("bbox_latmax", "Lat max"),
            bbox_lonmin: longitude("bbox_lonmin", "Lon min"),
            bbox_lonmax: longitude("bbox_lonmax", "Lon max"),
            tracks_file: FileSelector::new("tracks_file", "Track file").expanded(true),
            boundary_type_tracks: Choice::new(
                "boundary_type_tracks",
                "Boundary type",
                vec![
                    ("Rectangular", BoundaryShape::Rectangular),
                    ("Convex hull", BoundaryShape::ConvexHull),
                ],
            )
            .style(ChoiceStyle::RadioBoxes),
            bounding_geom_file: FileSelector::new("bounding_geom_file", "Bounding geometry file")
                .expanded(true),
            boundary_type_geom: Choice::new(
                "boundary_type_geom",
                "Boundary type",
                vec![
                    ("Rectangular", BoundaryShape::Rectangular),
                    ("Convex hull", BoundaryShape::ConvexHull),
                    ("Exact", BoundaryShape::Mask),
                ],
            )
            .style(ChoiceStyle::RadioBoxes),
            show_plot: Checkbox::new("show_plot", "Show plot", true),
            create_subset_button: Button::primary("create_subset_button", "Create subset"),
            groups: OptionGroups {
                bbox: WidgetGroup::new(
                    "bbox_widgets",
                    vec!["bbox_latmin", "bbox_latmax", "bbox_lonmin", "bbox_lonmax"],
                ),
                track_points: WidgetGroup::new(
                    "track_points_widgets",
                    vec!["tracks_file", "boundary_type_tracks", "buffer"],
                ),
                bounding_geom: WidgetGroup::new(
                    "bounding_geom_widgets",
                    vec!["bounding_geom_file", "boundary_type_geom", "buffer"],
                ),
            },
            shared: WidgetGroup::new(
                "shared_widgets",
                vec!["clip", "output_file", "show_plot", "create_subset_button"],
            ),
        }
    }

    /// The widget group shown for `option`.
    pub fn option_widgets(&self, option: SubsetOption) -> &WidgetGroup {
        match option {
            SubsetOption::BoundingBox => &self.groups.bbox,
            SubsetOption::TrackPoints => &self.groups.track_points,
            SubsetOption::BoundingGeometry => &self.groups.bounding_geom,
        }
    }

    /// Assemble the subset arguments for the active option.
    ///
    /// The bounding box is ordered `[lon_min, lat_min, lon_max, lat_max]`.
    pub fn collect_arguments(&self) -> SubsetRequest {
        let selection = match self.option_picker.selected() {
            SubsetOption::BoundingBox => SubsetSelection::BoundingBox {
                bbox: [
                    self.bbox_lonmin.get(),
                    self.bbox_latmin.get(),
                    self.bbox_lonmax.get(),
                    self.bbox_latmax.get(),
                ],
            },
            SubsetOption::TrackPoints => SubsetSelection::TrackPoints {
                track_points: self.tracks_file.path().to_string(),
                boundary_type: self.boundary_type_tracks.selected(),
                buffer: self.buffer.get(),
            },
            SubsetOption::BoundingGeometry => SubsetSelection::BoundingGeometry {
                bounding_geom: self.bounding_geom_file.path().to_string(),
                boundary_type: self.boundary_type_geom.selected(),
                buffer: self.buffer.get(),
            },
        };

        SubsetRequest {
            filename: self.input_file.path().to_string(),
            clip: self.clip.is_checked(),
            outfile: self.output_file.text().to_string(),
            selection,
        }
    }

    fn initial_view(&self) -> View<SubsetterSlot> {
        View::new()
            .with_slot(SubsetterSlot::Plot, Content::markdown(PLOT_PLACEHOLDER))
            .with_slot(
                SubsetterSlot::InputFile,
                Content::Widgets(WidgetGroup::new("input_file", vec!["input_file"])),
            )
            .with_slot(
                SubsetterSlot::OptionPicker,
                Content::Widgets(WidgetGroup::new("option_picker", vec!["option_picker"])),
            )
            .with_slot(
                SubsetterSlot::OptionWidgets,
                Content::Widgets(self.option_widgets(self.option_picker.selected()).clone()),
            )
            .with_slot(
                SubsetterSlot::SharedWidgets,
                Content::Widgets(self.shared.clone()),
            )
    }
}

impl Model for Subsetter {
    type Slot = SubsetterSlot;

    fn title(&self) -> &str {
        TITLE
    }

    fn widgets(&self) -> Vec<&dyn DynWidget> {
        vec![
            &self.input_file as &dyn DynWidget,
            &self.option_picker,
            &self.bbox_latmin,
            &self.bbox_latmax,
            &self.bbox_lonmin,
            &self.bbox_lonmax,
            &self.tracks_file,
            &self.boundary_type_tracks,
            &self.bounding_geom_file,
            &self.boundary_type_geom,
            &self.buffer,
            &self.clip,
            &self.output_file,
            &self.show_plot,
            &self.create_subset_button,
        ]
    }

    fn widget_mut(&mut self, name: &str) -> Option<&mut dyn DynWidget> {
        let widget: &mut dyn DynWidget = match name {
            "input_file" => &mut self.input_file,
            "option_picker" => &mut self.option_picker,
            "bbox_latmin" => &mut self.bbox_latmin,
            "bbox_latmax" => &mut self.bbox_latmax,
            "bbox_lonmin" => &mut self.bbox_lonmin,
            "bbox_lonmax" => &mut self.bbox_lonmax,
            "tracks_file" => &mut self.tracks_file,
            "boundary_type_tracks" => &mut self.boundary_type_tracks,
            "bounding_geom_file" => &mut self.bounding_geom_file,
            "boundary_type_geom" => &mut self.boundary_type_geom,
            "buffer" => &mut self.buffer,
            "clip" => &mut self.clip,
            "output_file" => &mut self.output_file,
            "show_plot" => &mut self.show_plot,
            "create_subset_button" => &mut self.create_subset_button,
            _ => return None,
        };
        Some(widget)
    }
}

/// Build a Subsetter session with its reactions declared.
pub fn session(services: Rc<dyn EcoServices>, config: &AppConfig) -> Session<Subsetter> {
    let model = Subsetter::new(services, config);
    let view = model.initial_view();
    let mut session = Session::new(model, view);

    session.declare("update_widgets", &["option_picker"], update_widgets);
    session.declare("create_subset", &["create_subset_button"], create_subset);

    session
}

/// Show the widget group of the selected option.
fn update_widgets(session: &mut Session<Subsetter>) -> HandlerResult {
    session.set_status("updated widgets");
    let option = session.model().option_picker.selected();
    let group = session.model().option_widgets(option).clone();
    session
        .view_mut()
        .replace(SubsetterSlot::OptionWidgets, Content::Widgets(group));
    Ok(())
}

fn create_subset(session: &mut Session<Subsetter>) -> HandlerResult {
    session.set_status("Creating subset...");
    session.with_loading(|s| {
        if let Err(err) = run_subset(s) {
            log::warn!("{}:\n{:?}", SUBSET_ERROR, err);
            s.view_mut()
                .replace(SubsetterSlot::Plot, Content::markdown(PLOT_PLACEHOLDER));
            s.set_status(SUBSET_ERROR);
        }
    });
    Ok(())
}

fn run_subset(session: &mut Session<Subsetter>) -> Result<(), EcoError> {
    let services = Rc::clone(&session.model().services);
    let request = session.model().collect_arguments();
    log::debug!("Subset request: {:?}", request);

    let result = services.subset_data(&request)?;

    if result.subset.is_empty() {
        session.set_status("No features in subset");
        session
            .view_mut()
            .replace(SubsetterSlot::Plot, Content::markdown(PLOT_PLACEHOLDER));
        return Ok(());
    }

    session.set_status("Subset created!");
    let content = if session.model().show_plot.is_checked() {
        Content::plot(services.plot_subset(&result)?)
    } else {
        Content::markdown(SAVED_MESSAGE)
    };
    session.view_mut().replace(SubsetterSlot::Plot, content);
    Ok(())
}
