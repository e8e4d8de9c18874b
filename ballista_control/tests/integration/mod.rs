mod bindings;
mod drive;
mod shooter_runs;
mod shoot_when_at_speed;
mod startup;
mod support;
