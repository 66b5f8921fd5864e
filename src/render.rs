use egui::{
    plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotUi, Points, Text},
    Align2, Color32, FontId, Response, RichText, TextStyle, Ui,
};

use crate::figure::{DrawCommand, Figure, Stroke, VerticalAlign};

const DASH_LENGTH: f32 = 6.0;

/// Renders the figure into `ui`, executing its commands in order.
pub fn show(ui: &mut Ui, figure: &Figure) -> Response {
    let axes = &figure.axes;
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(&axes.y_label).size(axes.label_size));
        // tick labels are laid out with the body text style
        ui.style_mut()
            .text_styles
            .insert(TextStyle::Body, FontId::proportional(axes.tick_size));
        let response = Plot::new("flight plot")
            .legend(Legend::default())
            .allow_boxed_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .include_x(axes.x_limits.0)
            .include_x(axes.x_limits.1)
            .include_y(axes.y_limits.0)
            .include_y(axes.y_limits.1)
            .height((ui.available_height() - 2.0 * axes.label_size).max(120.0))
            .show(ui, |plot_ui| {
                for command in figure.commands() {
                    draw(plot_ui, figure, command);
                }
            })
            .response;
        ui.label(RichText::new(&axes.x_label).size(axes.label_size));
        response
    })
    .inner
}

fn stroked(line: Line, stroke: &Stroke) -> Line {
    let line = line.color(stroke.color).width(stroke.width);
    if stroke.dashed {
        line.style(LineStyle::Dashed {
            length: DASH_LENGTH,
        })
    } else {
        line
    }
}

fn draw(plot_ui: &mut PlotUi, figure: &Figure, command: &DrawCommand) {
    match command {
        DrawCommand::Scatter {
            points,
            marker,
            name,
        } => {
            plot_ui.points(
                Points::new(points.clone())
                    .shape(MarkerShape::Circle)
                    .radius(marker.radius + 1.0)
                    .color(marker.edge)
                    .filled(true),
            );
            plot_ui.points(
                Points::new(points.clone())
                    .shape(MarkerShape::Circle)
                    .radius(marker.radius)
                    .color(marker.fill)
                    .filled(true)
                    .name(name),
            );
        }
        DrawCommand::Line {
            points,
            stroke,
            name,
        } => plot_ui.line(stroked(Line::new(points.clone()), stroke).name(name)),
        DrawCommand::Offset { x, from, to, stroke } => {
            plot_ui.line(stroked(Line::new(vec![[*x, *from], [*x, *to]]), stroke))
        }
        DrawCommand::Annotation {
            anchor,
            text,
            size,
            align,
        } => {
            let [x, y] = figure.to_data(*anchor);
            let anchor = match align {
                VerticalAlign::Top => Align2::LEFT_TOP,
                VerticalAlign::Baseline => Align2::LEFT_BOTTOM,
            };
            plot_ui.text(
                Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(text).size(*size).color(Color32::BLACK),
                )
                .anchor(anchor),
            )
        }
    }
}
