mod attribute;
mod describe;
