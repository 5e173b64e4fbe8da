//! Concept map operations for the Engine.

use super::Engine;
use crate::{
    error::Result,
    graph::{ConceptGraph, DiagramLayout, LinearLayout, RadialLayout, TieredLayout},
    models::Plan,
    params::{Id, MapFormat, MapStyle, RenderMap},
    plans::PlanStore,
    render::{render_png, render_svg},
};

/// An encoded concept map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMap {
    pub style: MapStyle,
    pub format: MapFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Lays out a plan's concept graph with the requested strategy.
pub fn layout_plan(plan: &Plan, style: MapStyle, highlight: Option<usize>) -> DiagramLayout {
    let graph = ConceptGraph::build(&plan.steps, highlight);
    match style {
        MapStyle::Linear => LinearLayout::default().layout(&graph),
        MapStyle::Radial => RadialLayout::default().layout(&graph, &plan.topic),
        MapStyle::Tiered => TieredLayout::default().layout(&graph, Some(&plan.topic)),
    }
}

impl Engine {
    /// Node/edge view of a plan's steps.
    pub async fn concept_graph(&self, params: &Id, highlight: Option<usize>) -> Result<ConceptGraph> {
        let plan_id = params.id;
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            Ok(ConceptGraph::build(&plan.steps, highlight))
        })
        .await
    }

    /// Renders a plan's concept map.
    ///
    /// Returns `None` for PNG output when raster support is unavailable.
    pub async fn render_map(&self, params: &RenderMap) -> Result<Option<RenderedMap>> {
        let RenderMap {
            plan_id,
            style,
            format,
            highlight,
        } = params.clone();
        self.with_db(move |db| {
            let plan = PlanStore::new(db).require(plan_id)?;
            let layout = layout_plan(&plan, style, highlight);
            let bytes = match format {
                MapFormat::Svg => Some(render_svg(&layout).into_bytes()),
                MapFormat::Png => render_png(&layout),
            };
            Ok(bytes.map(|bytes| RenderedMap {
                style,
                format,
                width: layout.width,
                height: layout.height,
                bytes,
            }))
        })
        .await
    }
}
