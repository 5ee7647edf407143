/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::{io::{Read, Write}, net::TcpListener, thread, time::Duration};
use fim_common::net::{FimNetError, download_url, http_client};

// run with "cargo test test_xx -- --nocapture"

/// serve a single HTTP request with the given status line and body, returns the URL to request
fn serve_once (status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn( move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any( |w| w == b"\r\n\r\n") {
            let n = stream.read( &mut buf).unwrap();
            if n == 0 { break }
            request.extend_from_slice( &buf[..n]);
        }
        let response = format!("HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}", body.len());
        stream.write_all( response.as_bytes()).unwrap();
    });

    format!("http://{addr}/tiles/17/1/2.tif")
}

#[test]
fn test_download_ok() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2.tif");
    let client = http_client( Some(Duration::from_secs(10))).unwrap();

    let url = serve_once( "200 OK", "tile data");
    let len = download_url( &client, &url, &path).unwrap();
    assert_eq!( len, 9);
    assert_eq!( std::fs::read_to_string( &path).unwrap(), "tile data");
}

#[test]
fn test_download_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2.tif");
    let client = http_client( Some(Duration::from_secs(10))).unwrap();

    let url = serve_once( "404 Not Found", "no such tile");
    let res = download_url( &client, &url, &path);
    println!("{res:?}");
    assert!( matches!( res, Err(FimNetError::NotFoundError(_))));
    assert!( !path.exists());
}

#[test]
fn test_download_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2.tif");
    let client = http_client( Some(Duration::from_secs(10))).unwrap();

    let url = serve_once( "500 Internal Server Error", "");
    let res = download_url( &client, &url, &path);
    assert!( matches!( res, Err(FimNetError::OpFailed(_))));
    assert!( !path.exists());
}
