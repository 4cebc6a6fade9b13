// src/ui/systems.rs
use crate::{locations::events::LocationsFeedback, ui::UiFeedbackState};
use bevy::prelude::*;
use std::any;

pub fn handle_ui_feedback(
    mut feedback_events: EventReader<LocationsFeedback>,
    mut ui_feedback_state: ResMut<UiFeedbackState>,
) {
    // An error from this frame wins over any success message from the same frame.
    let shown = feedback_events
        .read()
        .fold(None::<&LocationsFeedback>, |shown, event| match shown {
            Some(prev) if prev.is_error && !event.is_error => Some(prev),
            _ => Some(event),
        });
    let Some(event) = shown else {
        return;
    };

    ui_feedback_state.last_message = event.message.clone();
    ui_feedback_state.is_error = event.is_error;
    if event.is_error {
        warn!("UI Feedback (Error): {}", event.message);
    } else {
        trace!("UI Feedback: {}", event.message);
    }
}

/// Carries an event from a background task to the main world. Spawned on an
/// entity by the task, picked up by `forward_events`.
#[derive(Component)]
pub struct SendEvent<E: Event> {
    pub event: E,
}

pub fn forward_events<E: Event + Clone + std::fmt::Debug>(
    mut commands: Commands,
    mut writer: EventWriter<E>,
    query: Query<(Entity, &SendEvent<E>)>,
    mut event_type_name: Local<String>,
) {
    if event_type_name.is_empty() {
        *event_type_name = any::type_name::<E>().split("::").last().unwrap_or("UnknownEvent").to_string();
    }

    let mut count = 0;
    for (entity, send_event_component) in query.iter() {
        count += 1;
        trace!("Forwarding event type '{}' #{}: {:?}", *event_type_name, count, send_event_component.event);
        writer.write(send_event_component.event.clone());
        commands.entity(entity).despawn();
    }

    if count > 0 {
        debug!("Forwarded {} instance(s) of event type '{}'.", count, *event_type_name);
    }
}
