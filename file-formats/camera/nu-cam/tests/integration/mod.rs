mod document;
mod track;
mod transform;
