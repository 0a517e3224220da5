mod joins;
mod relations;
mod select;
