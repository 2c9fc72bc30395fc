use std::hint::black_box;

use bytes::BytesMut;
use criterion::{Criterion, criterion_group, criterion_main};
use http::Uri;
use micro_http_message::codec::RequestHeadEncoder;
use micro_http_message::protocol::{HttpMessage, Request};
use micro_http_message::stream::{MemoryStream, Whence};
use tokio_util::codec::Encoder;

fn browser_request() -> Request {
    Request::new("GET", Uri::from_static("http://127.0.0.1:8080/index/?a=1&b=2&a=3"))
        .unwrap()
        .with_header("Connection", "keep-alive")
        .unwrap()
        .with_header("Cache-Control", "max-age=0")
        .unwrap()
        .with_header("User-Agent", "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36")
        .unwrap()
        .with_header("Accept", ["text/html", "application/xhtml+xml", "*/*;q=0.8"])
        .unwrap()
        .with_header("Accept-Encoding", "gzip, deflate, br")
        .unwrap()
        .with_header("Accept-Language", "zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7")
        .unwrap()
}

fn bench_with_header(c: &mut Criterion) {
    let request = browser_request();

    c.bench_function("with_header", |b| {
        b.iter(|| black_box(request.with_header("X-Request-Id", "0f8fad5b-d9cb-469f-a165-70867728950e").unwrap()));
    });

    c.bench_function("with_host_header", |b| {
        b.iter(|| black_box(request.with_header("host", "example.com").unwrap()));
    });

    c.bench_function("header_line_lookup", |b| {
        b.iter(|| black_box(request.header_line("ACCEPT").unwrap()));
    });
}

fn bench_encode_head(c: &mut Criterion) {
    let request = browser_request();

    c.bench_function("encode_request_head", |b| {
        b.iter(|| {
            let mut dst = BytesMut::new();
            RequestHeadEncoder.encode(&request, &mut dst).unwrap();
            black_box(dst);
        });
    });
}

fn bench_stream(c: &mut Criterion) {
    let content = "0123456789abcdef".repeat(1024);

    c.bench_function("stream_read_chunks", |b| {
        let mut stream = MemoryStream::from_string(&content);
        b.iter(|| {
            stream.seek(0, Whence::Start).unwrap();
            while !stream.eof().unwrap() {
                black_box(stream.read(1024).unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_with_header, bench_encode_head, bench_stream);
criterion_main!(benches);
